//! TMDB v3 metadata source.
//!
//! Endpoints:
//! - `/movie/{id}`: details, carries `poster_path`
//! - `/movie/{id}/videos`: `results` list of `{type, site, key}`
//!
//! The API key travels as a query parameter and is never logged.

use std::time::Duration;

use async_trait::async_trait;
use data_loader::MovieId;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::TmdbConfig;
use crate::error::{ConfigError, FetchError};
use crate::source::{MetadataSource, MovieDetails, Video};

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbClient {
    /// Creates a client whose every request is bounded by `timeout`
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("missing TMDB API key".to_string()));
        }
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
        })
    }

    pub fn from_config(config: &TmdbConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.api_key.clone(),
            config.api_url.clone(),
            config.language.clone(),
            config.timeout(),
        )
    }

    /// Base URL requests are sent to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET an endpoint and parse the body as JSON
    async fn get_json(&self, endpoint: &str) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.api_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| FetchError::Decode(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl MetadataSource for TmdbClient {
    #[instrument(skip(self))]
    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails, FetchError> {
        let body = self.get_json(&format!("/movie/{}", movie_id)).await?;
        let details = MovieDetails::from_json(&body);
        debug!(has_poster = details.poster_path.is_some(), "Fetched movie details");
        Ok(details)
    }

    #[instrument(skip(self))]
    async fn movie_videos(&self, movie_id: MovieId) -> Result<Vec<Video>, FetchError> {
        let body = self.get_json(&format!("/movie/{}/videos", movie_id)).await?;
        let videos = Video::list_from_json(&body);
        debug!(count = videos.len(), "Fetched movie videos");
        Ok(videos)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_api_key() {
        let err = TmdbClient::new(" ", "https://api.themoviedb.org/3", "en-US", Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_trims_trailing_slash() {
        let client = TmdbClient::new("key", "http://localhost:9/3/", "en-US", Duration::from_secs(5))
            .unwrap();
        assert_eq!(client.api_url(), "http://localhost:9/3");
        assert_eq!(client.name(), "tmdb");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_retryable_transport_error() {
        use crate::retry::Retryable;

        // Port 9 (discard) on localhost is closed in test environments
        let client = TmdbClient::new("key", "http://127.0.0.1:9", "en-US", Duration::from_secs(1))
            .unwrap();
        let err = client.movie_details(1).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
        assert!(err.is_retryable());
    }
}
