//! Metadata API settings read from `TMDB_*` environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::retry::RetryPolicy;

/// Metadata API configuration loaded from `TMDB_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct TmdbConfig {
    /// API key (`TMDB_API_KEY`)
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Response language
    #[serde(default = "default_language")]
    pub language: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per fetch, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed wait between attempts in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

fn default_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    2
}

impl TmdbConfig {
    /// Load configuration from the environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit `TMDB_*` key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: TmdbConfig = envy::prefixed("TMDB_").from_iter(vars)?;
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("TMDB_API_KEY is empty".to_string()));
        }
        if config.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "TMDB_TIMEOUT_SECS must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.retry_delay_secs))
    }
}
