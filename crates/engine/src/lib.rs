//! # Engine Crate
//!
//! Similar-title recommendations from a precomputed similarity matrix.
//!
//! The engine is built once at startup from injected data and never mutated,
//! so it can be shared behind an `Arc` without locking.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use engine::RecommendationEngine;
//!
//! let dataset = Dataset::load_from_files(Path::new("data"))?;
//! let engine = RecommendationEngine::from_dataset(dataset)?;
//!
//! for rec in engine.recommend("Avatar")? {
//!     println!("{} ({}) {:.3}", rec.title, rec.movie_id, rec.score);
//! }
//! ```

pub mod engine;
pub mod error;

pub use engine::{DEFAULT_RECOMMENDATIONS, Recommendation, RecommendationEngine};
pub use error::{EngineError, Result};
