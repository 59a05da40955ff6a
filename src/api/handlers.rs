use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{AddOutcome, SearchRequest, SearchResponse, WatchlistEntry},
    services::search,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct AddWatchlistRequest {
    pub title: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct AddWatchlistResponse {
    pub status: AddOutcome,
    pub watchlist: Vec<WatchlistEntry>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Search by title or vibe
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    tracing::info!(
        request_id = %request_id,
        query = %request.query,
        "Processing search request"
    );

    // Embedding and poster lookups run without the session lock so the
    // watchlist stays readable while a search is in flight.
    let response = search::search(
        &state.recommender,
        state.posters.as_ref(),
        &request.query,
        request.top_n,
    )
    .await
    .inspect_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Search rejected");
    })?;

    state.session.write().await.record_results(response.clone());

    Ok(Json(response))
}

/// Results of the latest search, if any
pub async fn last_results(State(state): State<AppState>) -> Json<Option<SearchResponse>> {
    let session = state.session.read().await;
    Json(session.last_results.clone())
}

/// Get the watchlist in insertion order
pub async fn get_watchlist(State(state): State<AppState>) -> Json<Vec<WatchlistEntry>> {
    let session = state.session.read().await;
    Json(session.watchlist.entries().to_vec())
}

/// Queue a movie; duplicates are reported, not added
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Json(request): Json<AddWatchlistRequest>,
) -> (StatusCode, Json<AddWatchlistResponse>) {
    let mut session = state.session.write().await;
    let status = session.watchlist.add(request.title, request.id);

    let code = match status {
        AddOutcome::Added => StatusCode::CREATED,
        AddOutcome::AlreadyPresent => StatusCode::OK,
    };

    (
        code,
        Json(AddWatchlistResponse {
            status,
            watchlist: session.watchlist.entries().to_vec(),
        }),
    )
}

/// Remove the entry at a zero-based position
pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<Json<WatchlistEntry>> {
    let mut session = state.session.write().await;
    let removed = session.watchlist.remove(index)?;

    tracing::info!(title = %removed.title, id = removed.id, "Removed movie from watchlist");

    Ok(Json(removed))
}

/// Empty the watchlist
pub async fn clear_watchlist(State(state): State<AppState>) -> StatusCode {
    let mut session = state.session.write().await;
    session.watchlist.clear();

    tracing::info!("Watchlist cleared");

    StatusCode::NO_CONTENT
}
