//! Core domain types for the movie catalog and its similarity matrix.
//!
//! Both structures are built once at startup and only read afterwards, so
//! accessors hand out references and slices rather than owned copies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DataLoadError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a movie in the external metadata service (TMDB id)
pub type MovieId = u32;

/// Pairwise similarity score
pub type Score = f32;

// =============================================================================
// Catalog
// =============================================================================

/// A single catalog row: the movie's external id and its display title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub movie_id: MovieId,
    pub title: String,
}

impl CatalogEntry {
    pub fn new(movie_id: MovieId, title: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
        }
    }
}

/// Ordered collection of movies, addressed by position.
///
/// Position `i` in the catalog is row `i` of the similarity matrix.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    /// Title -> first position holding that title
    title_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, indexing titles for exact-match lookups.
    ///
    /// Duplicate titles are kept; lookups resolve to the lowest position.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut title_index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.title.trim().is_empty() {
                return Err(DataLoadError::InvalidValue {
                    field: "title".to_string(),
                    value: format!("<empty> at position {}", position),
                });
            }
            title_index.entry(entry.title.clone()).or_insert(position);
        }
        Ok(Self {
            entries,
            title_index,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the entry at a catalog position
    pub fn get(&self, position: usize) -> Option<&CatalogEntry> {
        self.entries.get(position)
    }

    /// Position of the first entry whose title matches exactly
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of pairwise similarity scores, stored row-major.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<Score>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows, rejecting anything that isn't square.
    pub fn from_rows(rows: Vec<Vec<Score>>) -> Result<Self> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(DataLoadError::RaggedMatrix {
                    row: row_idx,
                    expected: dimension,
                    found: row.len(),
                });
            }
            scores.extend(row);
        }
        Ok(Self { dimension, scores })
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Scores of catalog entry `index` against every entry
    pub fn row(&self, index: usize) -> Option<&[Score]> {
        if index >= self.dimension {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Score]> {
        // chunks_exact panics on zero, and an empty matrix has no rows anyway
        self.scores.chunks_exact(self.dimension.max(1))
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Catalog and similarity matrix loaded together and checked against each other.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(crate) catalog: Catalog,
    pub(crate) similarity: SimilarityMatrix,
}

impl Dataset {
    /// Pair a catalog with its matrix after checking that they line up
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self> {
        let dataset = Self {
            catalog,
            similarity,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Split the dataset back into its parts
    pub fn into_parts(self) -> (Catalog, SimilarityMatrix) {
        (self.catalog, self.similarity)
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.catalog.len(), self.similarity.dimension())
    }
}
