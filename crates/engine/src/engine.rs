//! Content-based "more like this" lookup over a precomputed similarity matrix.
//!
//! ## Algorithm
//! 1. Resolve the query title to its catalog position `i`
//! 2. Take row `i` of the matrix as `(position, score)` pairs
//! 3. Drop position `i` itself
//! 4. Stable sort by score, highest first (ties keep catalog order)
//! 5. Return the first `limit` entries

use data_loader::{Catalog, CatalogEntry, Dataset, MovieId, Score, SimilarityMatrix};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{EngineError, Result};

/// Number of similar titles returned by [`RecommendationEngine::recommend`]
pub const DEFAULT_RECOMMENDATIONS: usize = 5;

/// A catalog entry ranked against the query title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Catalog position (also the matrix column)
    pub index: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub score: Score,
}

/// Owns the catalog and similarity matrix; every query is a read-only lookup.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Catalog,
    similarity: SimilarityMatrix,
}

impl RecommendationEngine {
    /// Build an engine from a catalog and a matrix aligned with it
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self> {
        if similarity.dimension() != catalog.len() {
            return Err(EngineError::DimensionMismatch {
                matrix: similarity.dimension(),
                catalog: catalog.len(),
            });
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Build an engine from an already validated dataset
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let (catalog, similarity) = dataset.into_parts();
        Self::new(catalog, similarity)
    }

    /// Top 5 titles most similar to `title`
    pub fn recommend(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.recommend_n(title, DEFAULT_RECOMMENDATIONS)
    }

    /// Top `limit` titles most similar to `title`, never including `title` itself
    #[instrument(skip(self))]
    pub fn recommend_n(&self, title: &str, limit: usize) -> Result<Vec<Recommendation>> {
        let query = self
            .index_of(title)
            .ok_or_else(|| EngineError::NotFound(title.to_string()))?;
        let Some(row) = self.similarity.row(query) else {
            return Err(EngineError::NotFound(title.to_string()));
        };

        // Excluded by position: a duplicate or a higher-scoring neighbour never hides the query
        let mut ranked: Vec<(usize, Score)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(index, _)| *index != query)
            .collect();

        // sort_by is stable, so equal scores stay in catalog order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(limit);

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .filter_map(|(index, score)| {
                self.catalog.get(index).map(|entry| Recommendation {
                    index,
                    movie_id: entry.movie_id,
                    title: entry.title.clone(),
                    score,
                })
            })
            .collect();

        debug!(
            query_index = query,
            returned = recommendations.len(),
            "Ranked similar titles"
        );
        Ok(recommendations)
    }

    /// Whether `title` exactly matches a catalog entry
    pub fn contains(&self, title: &str) -> bool {
        self.catalog.position_of(title).is_some()
    }

    /// Catalog position of `title` (first match when titles repeat)
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.catalog.position_of(title)
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.catalog.get(index)
    }

    /// All titles in catalog order, for building a selection list
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.catalog.iter().map(|entry| entry.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Exact (case-insensitive) matches come first, then the rest in catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&CatalogEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(bool, &CatalogEntry)> = self
            .catalog
            .iter()
            .filter_map(|entry| {
                let title = entry.title.to_lowercase();
                if title == needle {
                    Some((true, entry))
                } else if title.contains(&needle) {
                    Some((false, entry))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by_key(|(exact, _)| !*exact);
        matches
            .into_iter()
            .take(limit)
            .map(|(_, entry)| entry)
            .collect()
    }
}
