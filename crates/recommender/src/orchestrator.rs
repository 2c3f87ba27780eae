//! # Recommendation Orchestrator
//!
//! Handles one request end to end:
//! 1. Rank similar titles with the engine (top 5)
//! 2. For each result, in order, fetch the poster, then the trailer
//! 3. Record each fetch outcome, never failing the request over enrichment
//!
//! Fetches run one after another; a slow metadata service slows the request
//! down but can't fail it.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use data_loader::MovieId;
use engine::{Recommendation, RecommendationEngine};
use enrichment::{poster_url, EnrichmentClient, PLACEHOLDER_POSTER_URL};

/// Result of looking up one piece of display data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Enrichment<T> {
    /// The service returned the data
    Available(T),
    /// The service answered but has nothing for this movie
    Missing,
    /// Every attempt failed
    Failed(String),
    /// Enrichment is turned off
    Skipped,
}

impl<T> Enrichment<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Enrichment::Available(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Enrichment::Failed(_))
    }
}

/// Final recommendation returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster: Enrichment<String>,
    pub trailer: Enrichment<String>,
}

impl MovieRecommendation {
    fn unenriched(rec: Recommendation) -> Self {
        Self {
            movie_id: rec.movie_id,
            title: rec.title,
            score: rec.score,
            poster: Enrichment::Skipped,
            trailer: Enrichment::Skipped,
        }
    }

    /// Poster to display: the fetched one or the placeholder
    pub fn poster_url(&self) -> &str {
        self.poster
            .available()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_POSTER_URL)
    }

    /// Trailer to display, if there is one
    pub fn trailer_url(&self) -> Option<&str> {
        self.trailer.available().map(String::as_str)
    }
}

/// Composes the engine with an optional enrichment client
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    engine: Arc<RecommendationEngine>,
    enrichment: Option<EnrichmentClient>,
}

impl RecommendationOrchestrator {
    pub fn new(engine: Arc<RecommendationEngine>, enrichment: EnrichmentClient) -> Self {
        Self {
            engine,
            enrichment: Some(enrichment),
        }
    }

    /// Orchestrator that ranks only; every result carries placeholders
    pub fn offline(engine: Arc<RecommendationEngine>) -> Self {
        Self {
            engine,
            enrichment: None,
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Main entry point: the top 5 titles similar to `title`, enriched
    pub async fn get_recommendations(&self, title: &str) -> Result<Vec<MovieRecommendation>> {
        self.get_recommendations_n(title, engine::DEFAULT_RECOMMENDATIONS)
            .await
    }

    /// Same as [`get_recommendations`](Self::get_recommendations) with a custom limit
    pub async fn get_recommendations_n(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<MovieRecommendation>> {
        let start_time = Instant::now();

        let ranked = self
            .engine
            .recommend_n(title, limit)
            .with_context(|| format!("Failed to rank titles similar to '{}'", title))?;
        info!("Ranked {} titles similar to '{}'", ranked.len(), title);

        let mut recommendations = Vec::with_capacity(ranked.len());
        for rec in ranked {
            recommendations.push(self.enrich(rec).await);
        }

        let failures = recommendations
            .iter()
            .filter(|r| r.poster.is_failed() || r.trailer.is_failed())
            .count();
        if failures > 0 {
            warn!(failures, "Some recommendations are missing display data");
        }

        info!(
            "Total time to get recommendations for '{}': {:.2?}",
            title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Fetch poster then trailer for a single result
    async fn enrich(&self, rec: Recommendation) -> MovieRecommendation {
        let mut result = MovieRecommendation::unenriched(rec);
        let Some(client) = &self.enrichment else {
            return result;
        };
        let movie_id = result.movie_id;

        result.poster = match client.poster_path(movie_id).await {
            Ok(Some(path)) => Enrichment::Available(poster_url(Some(&path))),
            Ok(None) => Enrichment::Missing,
            Err(e) => {
                warn!(movie_id, error = %e, "Failed to fetch poster");
                Enrichment::Failed(e.to_string())
            }
        };

        result.trailer = match client.fetch_trailer(movie_id).await {
            Ok(Some(url)) => Enrichment::Available(url),
            Ok(None) => Enrichment::Missing,
            Err(e) => {
                warn!(movie_id, error = %e, "Failed to fetch trailer");
                Enrichment::Failed(e.to_string())
            }
        };

        result
    }
}
