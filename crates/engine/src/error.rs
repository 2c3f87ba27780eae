//! Errors raised by the recommendation engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The requested title isn't in the catalog
    #[error("Title not found in catalog: {0}")]
    NotFound(String),

    /// Catalog and matrix disagree on the number of movies
    #[error("Similarity matrix is {matrix}x{matrix} but the catalog has {catalog} entries")]
    DimensionMismatch { matrix: usize, catalog: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
