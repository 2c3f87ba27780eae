//! Recommender crate for the movie-recs workspace.
//!
//! This crate holds the orchestrator that turns a selected title into a
//! ranked, enriched response by composing the engine and the enrichment
//! client.

pub mod orchestrator;

pub use orchestrator::{Enrichment, MovieRecommendation, RecommendationOrchestrator};
