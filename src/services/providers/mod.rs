/// External collaborators of the recommender
///
/// The scoring core only ever talks to these traits, so tests can swap in
/// deterministic stand-ins for the embedding model and the poster service.
use crate::error::AppResult;

pub mod ollama;
pub mod tmdb;

pub use ollama::OllamaEmbedder;
pub use tmdb::TmdbPosterProvider;

/// Turns free text into a sentence embedding
///
/// Implementations must return vectors from the same model the vibe
/// embedding table was built with.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Resolves poster artwork for a movie
///
/// Never fails: any problem upstream yields a placeholder image URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    async fn fetch_poster(&self, movie_id: i64) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
