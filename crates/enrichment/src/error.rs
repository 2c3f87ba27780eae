//! Errors for metadata fetches.
//!
//! A single request fails with a [`FetchError`]; the retry policy wraps the
//! final failure in a [`RetryError`] so callers can tell "gave up after
//! retrying" from "not worth retrying".

use thiserror::Error;

use crate::retry::{RetryError, Retryable};

/// A single failed request to the metadata service
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, timeout or body transfer failure
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Metadata API returned status {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The body wasn't JSON
    #[error("Invalid response from metadata API: {0}")]
    Decode(String),
}

impl Retryable for FetchError {
    fn is_retryable(&self) -> bool {
        // Any transport or HTTP failure, error statuses included, earns another attempt
        match self {
            FetchError::Http(_) | FetchError::Status { .. } | FetchError::Decode(_) => true,
        }
    }
}

/// Outcome of a fetch that didn't succeed within the retry policy
pub type EnrichmentError = RetryError<FetchError>;

/// Errors while reading enrichment configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load TMDB config: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid TMDB config: {0}")]
    Invalid(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
