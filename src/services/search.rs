use chrono::Utc;

use crate::{
    error::AppResult,
    models::{PosterCard, SearchResponse},
    services::{dispatcher::Recommender, providers::PosterProvider},
};

/// Runs one search
///
/// Routes the query and decorates every result with a poster. Takes no
/// session: callers record the response once it is complete, so the
/// session is never held across the embedder or poster calls.
pub async fn search(
    recommender: &Recommender,
    posters: &dyn PosterProvider,
    query: &str,
    top_n: Option<usize>,
) -> AppResult<SearchResponse> {
    let recommendations = match top_n {
        Some(top_n) => recommender.route_with_limit(query, top_n).await?,
        None => recommender.route(query).await?,
    };

    let mut results = Vec::with_capacity(recommendations.items.len());
    for recommendation in recommendations.items {
        let poster_url = posters.fetch_poster(recommendation.movie_id).await;
        results.push(PosterCard::new(recommendation, poster_url));
    }

    tracing::info!(
        results = results.len(),
        poster_provider = posters.name(),
        "Search completed"
    );

    Ok(SearchResponse {
        strategy: recommendations.strategy,
        results,
        generated_at: Utc::now(),
    })
}
