/// TMDB poster provider
///
/// Looks up `/3/movie/{id}` and joins its `poster_path` onto the image CDN
/// prefix. Posters are decoration, so every failure degrades to a
/// placeholder instead of an error.
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    services::providers::PosterProvider,
};

pub const MISSING_KEY_PLACEHOLDER: &str =
    "https://via.placeholder.com/500x750?text=Missing+API+Key";
pub const NO_POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Poster";

/// Subset of the TMDB movie details payload
#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    image_base: String,
    /// Resolved poster URLs, kept for the lifetime of the process
    resolved: Arc<RwLock<HashMap<i64, String>>>,
}

impl TmdbPosterProvider {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        image_base: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        if api_key.is_none() {
            tracing::warn!("No TMDB API key configured; posters will use a placeholder");
        }

        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base: image_base.trim_end_matches('/').to_string(),
            resolved: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!("{}/{}", self.image_base, poster_path.trim_start_matches('/'))
    }

    /// Fetches the movie's poster path from TMDB
    async fn request_poster_path(&self, api_key: &str, movie_id: i64) -> AppResult<String> {
        let url = format!("{}/3/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamUnavailable(format!(
                "TMDB returned status {} for movie {}",
                response.status(),
                movie_id
            )));
        }

        let details: TmdbMovieDetails = response.json().await?;

        details
            .poster_path
            .filter(|path| !path.trim().is_empty())
            .ok_or_else(|| {
                AppError::UpstreamUnavailable(format!("TMDB has no poster for movie {}", movie_id))
            })
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn fetch_poster(&self, movie_id: i64) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return MISSING_KEY_PLACEHOLDER.to_string();
        };

        if let Some(url) = self.resolved.read().await.get(&movie_id) {
            return url.clone();
        }

        match self.request_poster_path(api_key, movie_id).await {
            Ok(poster_path) => {
                let url = self.poster_url(&poster_path);
                self.resolved.write().await.insert(movie_id, url.clone());
                url
            }
            Err(e) => {
                tracing::warn!(
                    movie_id = movie_id,
                    error = %e,
                    provider = "tmdb",
                    "Poster lookup failed, using placeholder"
                );
                NO_POSTER_PLACEHOLDER.to_string()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn create_test_provider(api_key: Option<&str>) -> TmdbPosterProvider {
        TmdbPosterProvider::new(
            api_key.map(str::to_string),
            "http://127.0.0.1:1".to_string(),
            "https://image.tmdb.org/t/p/w500".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_poster_url_joins_path() {
        let provider = create_test_provider(Some("key"));
        assert_eq!(
            provider.poster_url("/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"),
            "https://image.tmdb.org/t/p/w500/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"
        );
    }

    #[test]
    fn test_missing_key_returns_placeholder() {
        let provider = create_test_provider(None);
        let url = tokio_test::block_on(provider.fetch_poster(19995));
        assert_eq!(url, MISSING_KEY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_unreachable_api_returns_no_poster() {
        let provider = create_test_provider(Some("key"));
        assert_eq!(provider.fetch_poster(19995).await, NO_POSTER_PLACEHOLDER);
        assert!(provider.resolved.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_resolved_posters_are_reused() {
        let provider = create_test_provider(Some("key"));
        provider
            .resolved
            .write()
            .await
            .insert(597, "https://image.tmdb.org/t/p/w500/titanic.jpg".to_string());

        assert_eq!(
            provider.fetch_poster(597).await,
            "https://image.tmdb.org/t/p/w500/titanic.jpg"
        );
    }

    /// Serves `/3/movie/:id` locally: 1 has a poster, 2 has none, anything
    /// else is a 404. Returns the base URL and a hit counter.
    async fn spawn_tmdb_stub() -> (String, Arc<AtomicUsize>) {
        async fn movie(
            State(hits): State<Arc<AtomicUsize>>,
            Path(id): Path<i64>,
        ) -> (StatusCode, Json<serde_json::Value>) {
            hits.fetch_add(1, Ordering::SeqCst);
            match id {
                1 => (StatusCode::OK, Json(json!({ "id": 1, "poster_path": "/x.jpg" }))),
                2 => (StatusCode::OK, Json(json!({ "id": 2, "poster_path": null }))),
                _ => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "status_message": "not found" })),
                ),
            }
        }

        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/3/movie/:id", get(movie))
            .with_state(hits.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), hits)
    }

    fn create_stub_provider(api_url: String) -> TmdbPosterProvider {
        TmdbPosterProvider::new(
            Some("key".to_string()),
            api_url,
            "https://image.tmdb.org/t/p/w500".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_poster_found_and_memoized() {
        let (api_url, hits) = spawn_tmdb_stub().await;
        let provider = create_stub_provider(api_url);

        assert_eq!(
            provider.fetch_poster(1).await,
            "https://image.tmdb.org/t/p/w500/x.jpg"
        );
        assert_eq!(
            provider.fetch_poster(1).await,
            "https://image.tmdb.org/t/p/w500/x.jpg"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_null_poster_path_returns_no_poster() {
        let (api_url, _) = spawn_tmdb_stub().await;
        let provider = create_stub_provider(api_url);

        assert_eq!(provider.fetch_poster(2).await, NO_POSTER_PLACEHOLDER);
        assert!(provider.resolved.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_returns_no_poster() {
        let (api_url, _) = spawn_tmdb_stub().await;
        let provider = create_stub_provider(api_url);

        assert_eq!(provider.fetch_poster(404).await, NO_POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_details_without_poster() {
        let details: TmdbMovieDetails = serde_json::from_str(r#"{"id":1,"poster_path":null}"#).unwrap();
        assert!(details.poster_path.is_none());
    }
}
