use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod session;
pub mod watchlist;

pub use session::Session;
pub use watchlist::{AddOutcome, Watchlist, WatchlistEntry};

/// A catalog row shared by the title and vibe models
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    pub movie_id: i64,
    /// Raw TMDB popularity
    #[serde(default)]
    pub popularity: f32,
    /// Emotional positivity, nominally in [0, 1]
    #[serde(default)]
    pub tone_score: f32,
}

/// A single ranked movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub movie_id: i64,
    /// Blended vibe score; absent for title-based results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Recommendation {
    pub fn from_movie(movie: &Movie, score: Option<f32>) -> Self {
        Self {
            title: movie.title.clone(),
            movie_id: movie.movie_id,
            score,
        }
    }
}

/// Which recommender produced a result set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Strategy {
    /// Exact title match, carrying the catalog's spelling of the title
    Title { matched_title: String },
    /// Free-text semantic search
    Vibe { query: String },
}

/// Output of the dispatcher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub strategy: Strategy,
    pub items: Vec<Recommendation>,
}

/// A recommendation decorated for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PosterCard {
    pub title: String,
    pub movie_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    pub poster_url: String,
    pub tmdb_url: String,
}

impl PosterCard {
    pub fn new(recommendation: Recommendation, poster_url: String) -> Self {
        Self {
            tmdb_url: tmdb_movie_url(recommendation.movie_id),
            title: recommendation.title,
            movie_id: recommendation.movie_id,
            score: recommendation.score,
            poster_url,
        }
    }
}

/// Public TMDB page for a movie
pub fn tmdb_movie_url(movie_id: i64) -> String {
    format!("https://www.themoviedb.org/movie/{}", movie_id)
}

/// Response for a search, also kept as the session's last results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub strategy: Strategy,
    pub results: Vec<PosterCard>,
    pub generated_at: DateTime<Utc>,
}

/// Request body for a search
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub top_n: Option<usize>,
}
