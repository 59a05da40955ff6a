use crate::{
    data::TitleModel,
    error::{AppError, AppResult},
    models::Recommendation,
    services::similarity::sort_descending,
};

/// Catalog row of the first movie whose title matches, ignoring case and
/// surrounding whitespace
pub fn find_title_index(model: &TitleModel, title: &str) -> Option<usize> {
    let wanted = title.trim().to_lowercase();
    model
        .movies
        .iter()
        .position(|movie| movie.title.to_lowercase() == wanted)
}

/// Returns the `top_n` movies most similar to `title`
///
/// Reads the matched movie's row of the similarity matrix, ranks it highest
/// first and never includes the matched movie itself.
pub fn recommend_by_title(
    model: &TitleModel,
    title: &str,
    top_n: usize,
) -> AppResult<Vec<Recommendation>> {
    let index = find_title_index(model, title).ok_or_else(|| {
        AppError::NotFound(format!("Title '{}' is not in the catalog", title.trim()))
    })?;

    let mut scored: Vec<(usize, f32)> = model.similarity[index]
        .iter()
        .copied()
        .enumerate()
        .collect();
    sort_descending(&mut scored);

    let recommendations: Vec<Recommendation> = scored
        .into_iter()
        .filter(|(i, _)| *i != index)
        .take(top_n)
        .map(|(i, _)| Recommendation::from_movie(&model.movies[i], None))
        .collect();

    tracing::debug!(
        title = %model.movies[index].title,
        row = index,
        results = recommendations.len(),
        "Title recommendations ranked"
    );

    Ok(recommendations)
}
