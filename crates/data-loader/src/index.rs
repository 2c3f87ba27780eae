//! Dataset loading and validation.
//!
//! Parses the catalog and the similarity matrix side by side, then checks
//! that they describe the same set of movies before anything reads them.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// File holding the catalog inside a data directory
pub const CATALOG_FILE: &str = "movies.json";

/// File holding the similarity matrix inside a data directory
pub const SIMILARITY_FILE: &str = "similarity.json";

impl Dataset {
    /// Load the catalog and similarity matrix from a directory
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Check matrix dimension against catalog size
    /// 3. Check every score is finite
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading dataset from {:?}", data_dir);

        let catalog_path = data_dir.join(CATALOG_FILE);
        let similarity_path = data_dir.join(SIMILARITY_FILE);

        // The matrix is n^2 and dominates load time; parse the catalog alongside it
        let (catalog, similarity) = rayon::join(
            || parser::parse_catalog(&catalog_path),
            || parser::parse_similarity(&similarity_path),
        );
        let catalog = catalog?;
        let similarity = similarity?;

        info!(
            "Loaded {} catalog entries and a {}x{} similarity matrix",
            catalog.len(),
            similarity.dimension(),
            similarity.dimension()
        );

        let dataset = Dataset::new(catalog, similarity)?;
        debug!("Dataset validated");
        Ok(dataset)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - The matrix has one row per catalog entry
    /// - Every score is a finite number
    pub fn validate(&self) -> Result<()> {
        let matrix = self.similarity.dimension();
        let catalog = self.catalog.len();
        if matrix != catalog {
            return Err(DataLoadError::DimensionMismatch { matrix, catalog });
        }

        // Report the first offending cell in row order, not whichever thread finds one
        let bad_cell = self
            .similarity
            .rows()
            .collect::<Vec<_>>()
            .par_iter()
            .enumerate()
            .find_map_first(|(row, scores)| {
                scores
                    .iter()
                    .position(|score| !score.is_finite())
                    .map(|col| (row, col))
            });

        match bad_cell {
            Some((row, col)) => Err(DataLoadError::NonFiniteScore { row, col }),
            None => Ok(()),
        }
    }
}
