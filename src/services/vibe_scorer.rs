use crate::{
    data::VibeModel,
    error::{AppError, AppResult},
    models::{Movie, Recommendation},
    services::{
        providers::Embedder,
        similarity::{cosine_similarity, sort_descending},
    },
};

/// Rows at or below this similarity are treated as noise
pub const SIMILARITY_THRESHOLD: f32 = 0.30;
pub const SIMILARITY_WEIGHT: f32 = 0.9;
pub const POPULARITY_WEIGHT: f32 = 0.1;

/// Substrings that tilt results toward upbeat movies
const TONE_KEYWORDS: [&str; 2] = ["animated", "kids"];

/// A row that survived the threshold, with its tone-adjusted similarity
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub index: usize,
    pub similarity: f32,
}

/// True when the query asks for family-friendly content
pub fn wants_upbeat_tone(query: &str) -> bool {
    let query = query.to_lowercase();
    TONE_KEYWORDS.iter().any(|keyword| query.contains(keyword))
}

/// Embeds `query` and ranks the vibe catalog against it
pub async fn recommend_by_vibe(
    model: &VibeModel,
    embedder: &dyn Embedder,
    query: &str,
    top_n: usize,
) -> AppResult<Vec<Recommendation>> {
    let query_embedding = embedder.embed(query).await?;
    score_vibe(model, query, &query_embedding, top_n)
}

/// Ranks the vibe catalog against an already computed query embedding
pub fn score_vibe(
    model: &VibeModel,
    query: &str,
    query_embedding: &[f32],
    top_n: usize,
) -> AppResult<Vec<Recommendation>> {
    if !model.embeddings.is_empty() && query_embedding.len() != model.dimension() {
        return Err(AppError::Embedding(format!(
            "query embedding has dimension {}, table expects {}",
            query_embedding.len(),
            model.dimension()
        )));
    }

    let similarities: Vec<f32> = model
        .embeddings
        .iter()
        .map(|row| cosine_similarity(query_embedding, row))
        .collect();

    let results = rank(&model.movies, query, &similarities, top_n);

    tracing::debug!(
        query = %query,
        candidates = model.movies.len(),
        results = results.len(),
        "Vibe recommendations ranked"
    );

    Ok(results)
}

/// Applies the threshold and, for upbeat queries, the tone multiplier
pub(crate) fn candidates(movies: &[Movie], query: &str, similarities: &[f32]) -> Vec<Candidate> {
    let upbeat = wants_upbeat_tone(query);

    similarities
        .iter()
        .enumerate()
        .filter(|(_, similarity)| **similarity > SIMILARITY_THRESHOLD)
        .map(|(index, similarity)| {
            let similarity = if upbeat {
                similarity * (1.0 + movies[index].tone_score)
            } else {
                *similarity
            };
            Candidate { index, similarity }
        })
        .collect()
}

/// Blends candidates with their popularity and keeps the best `top_n`
pub(crate) fn rank(
    movies: &[Movie],
    query: &str,
    similarities: &[f32],
    top_n: usize,
) -> Vec<Recommendation> {
    let candidates = candidates(movies, query, similarities);
    if candidates.is_empty() {
        return Vec::new();
    }

    let max_popularity = candidates
        .iter()
        .map(|c| movies[c.index].popularity)
        .fold(f32::NEG_INFINITY, f32::max);

    let mut scored: Vec<(usize, f32)> = candidates
        .iter()
        .map(|c| {
            let pop_boost = if max_popularity > 0.0 {
                movies[c.index].popularity / max_popularity
            } else {
                0.0
            };
            let final_score = c.similarity * SIMILARITY_WEIGHT + pop_boost * POPULARITY_WEIGHT;
            (c.index, final_score)
        })
        .collect();
    sort_descending(&mut scored);

    scored
        .into_iter()
        .take(top_n)
        .map(|(i, score)| Recommendation::from_movie(&movies[i], Some(score)))
        .collect()
}
