//! Enrichment client for recommended movies.
//!
//! This crate fetches the auxiliary display data shown next to a
//! recommendation from the TMDB metadata API:
//! - a poster image URL (placeholder when the movie has none)
//! - an optional YouTube trailer URL
//!
//! Every fetch runs under a [`RetryPolicy`] (3 attempts, 2 s apart by
//! default) with a bounded per-request timeout. Failures come back as
//! values; deciding on a placeholder is left to the caller.
//!
//! ## Example Usage
//! ```ignore
//! let config = TmdbConfig::from_env()?;
//! let source = Arc::new(TmdbClient::from_config(&config)?);
//! let client = EnrichmentClient::new(source, config.retry_policy());
//!
//! let poster = client
//!     .fetch_poster(19995)
//!     .await
//!     .unwrap_or_else(|_| PLACEHOLDER_POSTER_URL.to_string());
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod retry;
pub mod source;
pub mod tmdb;

pub use client::{
    poster_url, trailer_url, EnrichmentClient, PLACEHOLDER_POSTER_URL, POSTER_BASE_URL,
    YOUTUBE_WATCH_URL,
};
pub use config::TmdbConfig;
pub use error::{ConfigError, EnrichmentError, FetchError};
pub use retry::{RetryError, RetryPolicy, Retryable};
pub use source::{MetadataSource, MovieDetails, Video};
pub use tmdb::TmdbClient;
