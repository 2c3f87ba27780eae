//! # Data Loader Crate
//!
//! Loads the movie catalog and the precomputed pairwise similarity matrix
//! that the recommendation engine ranks against.
//!
//! ## Main Components
//!
//! - **types**: Catalog, CatalogEntry, SimilarityMatrix, Dataset
//! - **parser**: Parse the JSON files into those types
//! - **index**: Load a data directory and validate the result
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_files(Path::new("data"))?;
//! let (movies, dimension) = dataset.counts();
//! println!("{} movies, {}x{} matrix", movies, dimension, dimension);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{CATALOG_FILE, SIMILARITY_FILE};
pub use types::{
    // Type aliases
    MovieId,
    Score,
    // Core types
    Catalog,
    CatalogEntry,
    Dataset,
    SimilarityMatrix,
};
