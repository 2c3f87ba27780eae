//! Poster and trailer lookups under the retry policy.

use std::sync::Arc;

use data_loader::MovieId;
use tracing::instrument;

use crate::error::EnrichmentError;
use crate::retry::RetryPolicy;
use crate::source::{MetadataSource, Video};

/// Prefix for TMDB poster paths (w500 rendition)
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500/";

/// Shown when a movie has no poster or the lookup failed
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500?text=No+Image+Available";

/// Prefix for a YouTube video key
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

const TRAILER_TYPE: &str = "Trailer";
const TRAILER_SITE: &str = "YouTube";

/// Full poster URL for a poster path, or the placeholder when there is none
pub fn poster_url(poster_path: Option<&str>) -> String {
    match poster_path.map(|path| path.trim_start_matches('/')) {
        Some(path) if !path.is_empty() => format!("{}{}", POSTER_BASE_URL, path),
        _ => PLACEHOLDER_POSTER_URL.to_string(),
    }
}

/// Watch URL of the first YouTube trailer in `videos`
pub fn trailer_url(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|video| video.kind == TRAILER_TYPE && video.site == TRAILER_SITE)
        .map(|video| format!("{}{}", YOUTUBE_WATCH_URL, video.key))
}

/// Fetches display data for recommended movies.
///
/// Each call is independent: one request per attempt, up to the policy's
/// attempt limit, with the policy's fixed delay in between.
#[derive(Clone)]
pub struct EnrichmentClient {
    source: Arc<dyn MetadataSource>,
    retry_policy: RetryPolicy,
}

impl EnrichmentClient {
    pub fn new(source: Arc<dyn MetadataSource>, retry_policy: RetryPolicy) -> Self {
        Self {
            source,
            retry_policy,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Poster path for a movie: `Ok(None)` means the movie has no poster,
    /// `Err` means we couldn't find out.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn poster_path(&self, movie_id: MovieId) -> Result<Option<String>, EnrichmentError> {
        let details = self
            .retry_policy
            .run("movie_details", || self.source.movie_details(movie_id))
            .await?;
        Ok(details.poster_path)
    }

    /// Poster image URL; the placeholder URL if the movie has no poster.
    ///
    /// Fails only when every attempt failed; callers substitute
    /// [`PLACEHOLDER_POSTER_URL`] in that case.
    pub async fn fetch_poster(&self, movie_id: MovieId) -> Result<String, EnrichmentError> {
        let path = self.poster_path(movie_id).await?;
        Ok(poster_url(path.as_deref()))
    }

    /// Watch URL of the movie's first YouTube trailer, `None` if it has none.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn fetch_trailer(&self, movie_id: MovieId) -> Result<Option<String>, EnrichmentError> {
        let videos = self
            .retry_policy
            .run("movie_videos", || self.source.movie_videos(movie_id))
            .await?;
        Ok(trailer_url(&videos))
    }
}
