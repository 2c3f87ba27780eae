//! Error types for the data-loader crate.
//!
//! Every failure while reading or validating the catalog and the similarity
//! matrix ends up here, so callers only have one error type to match on.

use thiserror::Error;

/// Errors that can occur while loading the catalog and similarity matrix
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File contents were not valid JSON of the expected shape
    #[error("Parse error in {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The similarity matrix is not square
    #[error("Similarity row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Matrix dimension doesn't line up with the catalog
    #[error("Similarity matrix is {matrix}x{matrix} but the catalog has {catalog} entries")]
    DimensionMismatch { matrix: usize, catalog: usize },

    /// A score was NaN or infinite
    #[error("Non-finite similarity score at ({row}, {col})")]
    NonFiniteScore { row: usize, col: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
