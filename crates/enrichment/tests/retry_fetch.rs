//! Enrichment fetches against a scripted metadata service.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use enrichment::{
    EnrichmentClient, FetchError, MetadataSource, MovieDetails, RetryError, RetryPolicy, Video,
    PLACEHOLDER_POSTER_URL,
};

/// Replays queued responses in order; an empty queue behaves like a 503
#[derive(Default)]
struct ScriptedSource {
    details: Mutex<VecDeque<Result<MovieDetails, FetchError>>>,
    videos: Mutex<VecDeque<Result<Vec<Video>, FetchError>>>,
    calls: AtomicU32,
}

impl ScriptedSource {
    fn with_details(responses: Vec<Result<MovieDetails, FetchError>>) -> Self {
        Self {
            details: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    fn with_videos(responses: Vec<Result<Vec<Video>, FetchError>>) -> Self {
        Self {
            videos: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

fn unavailable() -> FetchError {
    FetchError::Status {
        status: 503,
        endpoint: "/movie/42".to_string(),
    }
}

fn not_found() -> FetchError {
    FetchError::Status {
        status: 404,
        endpoint: "/movie/42".to_string(),
    }
}

#[async_trait]
impl MetadataSource for ScriptedSource {
    async fn movie_details(&self, _movie_id: u32) -> Result<MovieDetails, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unavailable()))
    }

    async fn movie_videos(&self, _movie_id: u32) -> Result<Vec<Video>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.videos
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unavailable()))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn client_for(source: Arc<ScriptedSource>) -> EnrichmentClient {
    EnrichmentClient::new(source, RetryPolicy::new(3, Duration::ZERO))
}

#[tokio::test]
async fn test_poster_succeeds_after_two_failures() {
    let source = Arc::new(ScriptedSource::with_details(vec![
        Err(unavailable()),
        Err(unavailable()),
        Ok(MovieDetails {
            poster_path: Some("/poster.jpg".to_string()),
        }),
    ]));
    let client = client_for(source.clone());

    let url = client.fetch_poster(42).await.unwrap();

    assert_eq!(url, "https://image.tmdb.org/t/p/w500/poster.jpg");
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_poster_exhausts_after_three_failures() {
    let source = Arc::new(ScriptedSource::with_details(vec![]));
    let client = client_for(source.clone());

    let err = client.fetch_poster(42).await.unwrap_err();
    assert!(matches!(err, RetryError::Exhausted { attempts: 3, .. }));
    assert_eq!(source.calls(), 3);

    // What a caller shows instead
    let shown = client
        .fetch_poster(42)
        .await
        .unwrap_or_else(|_| PLACEHOLDER_POSTER_URL.to_string());
    assert_eq!(shown, PLACEHOLDER_POSTER_URL);
}

#[tokio::test]
async fn test_missing_poster_is_placeholder_not_error() {
    let source = Arc::new(ScriptedSource::with_details(vec![
        Ok(MovieDetails::default()),
        Ok(MovieDetails::default()),
    ]));
    let client = client_for(source.clone());

    assert_eq!(client.poster_path(42).await.unwrap(), None);
    assert_eq!(client.fetch_poster(42).await.unwrap(), PLACEHOLDER_POSTER_URL);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_error_statuses_are_retried_until_exhausted() {
    let source = Arc::new(ScriptedSource::with_details(vec![
        Err(not_found()),
        Err(not_found()),
        Err(not_found()),
    ]));
    let client = client_for(source.clone());

    let err = client.fetch_poster(42).await.unwrap_err();
    assert!(matches!(
        err,
        RetryError::Exhausted {
            attempts: 3,
            last: FetchError::Status { status: 404, .. }
        }
    ));
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_unauthorized_trailer_lookup_is_retried() {
    let unauthorized = || FetchError::Status {
        status: 401,
        endpoint: "/movie/42/videos".to_string(),
    };
    let source = Arc::new(ScriptedSource::with_videos(vec![
        Err(unauthorized()),
        Err(unauthorized()),
        Err(unauthorized()),
    ]));
    let client = client_for(source.clone());

    let err = client.fetch_trailer(42).await.unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_poster_recovers_after_not_found() {
    let source = Arc::new(ScriptedSource::with_details(vec![
        Err(not_found()),
        Ok(MovieDetails {
            poster_path: Some("/late.jpg".to_string()),
        }),
    ]));
    let client = client_for(source.clone());

    assert_eq!(
        client.fetch_poster(42).await.unwrap(),
        "https://image.tmdb.org/t/p/w500/late.jpg"
    );
    assert_eq!(source.calls(), 2);
}
#[tokio::test]
async fn test_trailer_found_after_retry() {
    let source = Arc::new(ScriptedSource::with_videos(vec![
        Err(unavailable()),
        Ok(vec![
            Video::new("Featurette", "YouTube", "feat"),
            Video::new("Trailer", "YouTube", "6ZfuNTqbHE8"),
        ]),
    ]));
    let client = client_for(source.clone());

    assert_eq!(
        client.fetch_trailer(42).await.unwrap().as_deref(),
        Some("https://www.youtube.com/watch?v=6ZfuNTqbHE8")
    );
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_trailer_absent_without_youtube_trailer() {
    let source = Arc::new(ScriptedSource::with_videos(vec![Ok(vec![
        Video::new("Teaser", "YouTube", "t1"),
        Video::new("Trailer", "Vimeo", "v1"),
    ])]));
    let client = client_for(source);

    assert_eq!(client.fetch_trailer(42).await.unwrap(), None);
}

#[tokio::test]
async fn test_trailer_exhausted_retries_surface_as_error() {
    let source = Arc::new(ScriptedSource::with_videos(vec![]));
    let client = client_for(source.clone());

    let err = client.fetch_trailer(42).await.unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(source.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_default_policy_waits_between_attempts() {
    let source = Arc::new(ScriptedSource::with_details(vec![]));
    let client = EnrichmentClient::new(source.clone(), RetryPolicy::default());

    let start = tokio::time::Instant::now();
    let _ = client.fetch_poster(42).await;

    // Two waits of 2 s between three attempts
    let waited = start.elapsed();
    assert!(waited >= Duration::from_secs(4) && waited < Duration::from_secs(5));
    assert_eq!(source.calls(), 3);
}
