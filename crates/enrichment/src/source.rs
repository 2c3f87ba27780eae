//! Metadata source abstraction.
//!
//! The enrichment client only needs two lookups per movie: details (for the
//! poster path) and the list of attached videos. Anything that can answer
//! those, the real TMDB client or a scripted fake in tests, plugs in here.

use async_trait::async_trait;
use data_loader::MovieId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;

/// The parts of a movie's details response we use
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub poster_path: Option<String>,
}

impl MovieDetails {
    /// Read from a raw response, treating a missing or mistyped field as absent
    pub fn from_json(value: &Value) -> Self {
        let poster_path = value
            .get("poster_path")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(str::to_string);
        Self { poster_path }
    }
}

/// One entry of a movie's video list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// "Trailer", "Teaser", "Clip", ...
    #[serde(rename = "type")]
    pub kind: String,
    /// Hosting platform, e.g. "YouTube"
    pub site: String,
    /// Platform-specific video key
    pub key: String,
}

impl Video {
    pub fn new(kind: impl Into<String>, site: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            site: site.into(),
            key: key.into(),
        }
    }

    /// Read the `results` array of a videos response.
    ///
    /// Entries missing a field are skipped; a missing array is an empty list.
    pub fn list_from_json(value: &Value) -> Vec<Self> {
        value
            .get("results")
            .and_then(Value::as_array)
            .map(|results| {
                results
                    .iter()
                    .filter_map(|entry| {
                        Some(Video::new(
                            entry.get("type")?.as_str()?,
                            entry.get("site")?.as_str()?,
                            entry.get("key")?.as_str()?,
                        ))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A single-shot metadata lookup; retries are layered on top by the client
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Details for one movie
    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails, FetchError>;

    /// Videos attached to one movie
    async fn movie_videos(&self, movie_id: MovieId) -> Result<Vec<Video>, FetchError>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}
