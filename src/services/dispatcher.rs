use std::{collections::HashMap, sync::Arc};

use crate::{
    data::{TitleModel, VibeModel},
    error::{AppError, AppResult},
    models::{Recommendations, Strategy},
    services::{providers::Embedder, title_matcher, vibe_scorer},
};

/// Routes a query to the title matcher or the vibe scorer
///
/// A query that equals a catalog title (ignoring case and surrounding
/// whitespace) is a title lookup; anything else is a vibe description.
pub struct Recommender {
    title_model: Arc<TitleModel>,
    vibe_model: Arc<VibeModel>,
    embedder: Arc<dyn Embedder>,
    /// Lowercased title → catalog spelling, first occurrence wins
    titles: HashMap<String, String>,
    default_top_n: usize,
}

impl Recommender {
    pub fn new(
        title_model: Arc<TitleModel>,
        vibe_model: Arc<VibeModel>,
        embedder: Arc<dyn Embedder>,
        default_top_n: usize,
    ) -> Self {
        let mut titles = HashMap::with_capacity(title_model.movies.len());
        for movie in &title_model.movies {
            titles
                .entry(movie.title.to_lowercase())
                .or_insert_with(|| movie.title.clone());
        }

        tracing::info!(
            titles = titles.len(),
            vibe_movies = vibe_model.movies.len(),
            embedder = embedder.name(),
            "Recommender ready"
        );

        Self {
            title_model,
            vibe_model,
            embedder,
            titles,
            default_top_n,
        }
    }

    /// Catalog spelling of `input` if it names a known title
    pub fn match_title(&self, input: &str) -> Option<&str> {
        self.titles
            .get(&input.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Recommends using the configured result count
    pub async fn route(&self, input: &str) -> AppResult<Recommendations> {
        self.route_with_limit(input, self.default_top_n).await
    }

    pub async fn route_with_limit(&self, input: &str, top_n: usize) -> AppResult<Recommendations> {
        if input.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }
        if top_n == 0 {
            return Err(AppError::InvalidInput(
                "top_n must be at least 1".to_string(),
            ));
        }

        if let Some(title) = self.match_title(input) {
            let items = title_matcher::recommend_by_title(&self.title_model, title, top_n)?;

            tracing::info!(
                title = %title,
                results = items.len(),
                "Found exact title match, using title-based recommender"
            );

            return Ok(Recommendations {
                strategy: Strategy::Title {
                    matched_title: title.to_string(),
                },
                items,
            });
        }

        let query = input.trim();
        let items =
            vibe_scorer::recommend_by_vibe(&self.vibe_model, self.embedder.as_ref(), query, top_n)
                .await?;

        tracing::info!(
            query = %query,
            results = items.len(),
            "No exact title match, using vibe search"
        );

        Ok(Recommendations {
            strategy: Strategy::Vibe {
                query: query.to_string(),
            },
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;
    use crate::services::providers::MockEmbedder;

    fn movie(title: &str, movie_id: i64, popularity: f32, tone_score: f32) -> Movie {
        Movie {
            title: title.to_string(),
            movie_id,
            popularity,
            tone_score,
        }
    }

    fn title_model() -> TitleModel {
        TitleModel::new(
            vec![
                movie("Avatar", 19995, 0.0, 0.0),
                movie("Aliens", 679, 0.0, 0.0),
                movie("Titanic", 597, 0.0, 0.0),
                movie("AVATAR", 999, 0.0, 0.0),
            ],
            vec![
                vec![1.0, 0.8, 0.6, 0.2],
                vec![0.8, 1.0, 0.5, 0.1],
                vec![0.6, 0.5, 1.0, 0.3],
                vec![0.2, 0.1, 0.3, 1.0],
            ],
        )
        .unwrap()
    }

    fn vibe_model() -> VibeModel {
        VibeModel::new(
            vec![
                movie("Toy Story", 862, 100.0, 0.9),
                movie("Heat", 949, 80.0, 0.1),
            ],
            vec![vec![0.8, 0.6], vec![0.6, 0.8]],
        )
        .unwrap()
    }

    fn recommender(embedder: MockEmbedder) -> Recommender {
        Recommender::new(
            Arc::new(title_model()),
            Arc::new(vibe_model()),
            Arc::new(embedder),
            10,
        )
    }

    fn unused_embedder() -> MockEmbedder {
        let mut embedder = MockEmbedder::new();
        embedder.expect_name().return_const("mock");
        embedder.expect_embed().times(0);
        embedder
    }

    #[tokio::test]
    async fn test_exact_title_routes_to_title_matcher() {
        let recommender = recommender(unused_embedder());

        let result = recommender.route("  avatar ").await.unwrap();

        assert_eq!(
            result.strategy,
            Strategy::Title {
                matched_title: "Avatar".to_string()
            }
        );
        assert_eq!(result.items[0].movie_id, 679);
        assert!(result.items.iter().all(|r| r.movie_id != 19995));
    }

    #[tokio::test]
    async fn test_duplicate_lowercase_titles_first_wins() {
        let recommender = recommender(unused_embedder());
        assert_eq!(recommender.match_title("AvAtAr"), Some("Avatar"));
    }

    #[tokio::test]
    async fn test_every_catalog_title_routes_to_title_matcher() {
        let recommender = recommender(unused_embedder());

        for title in ["Avatar", "aliens", "TITANIC"] {
            let result = recommender.route(title).await.unwrap();
            assert!(matches!(result.strategy, Strategy::Title { .. }));
        }
    }

    #[tokio::test]
    async fn test_unknown_input_routes_to_vibe_scorer() {
        let mut embedder = MockEmbedder::new();
        embedder.expect_name().return_const("mock");
        embedder
            .expect_embed()
            .withf(|text| text.to_string() == "Happy Animated movies")
            .times(1)
            .returning(|_| Ok(vec![1.0, 0.0]));
        let recommender = recommender(embedder);

        let result = recommender.route("  Happy Animated movies\n").await.unwrap();

        assert_eq!(
            result.strategy,
            Strategy::Vibe {
                query: "Happy Animated movies".to_string()
            }
        );
        assert_eq!(result.items[0].movie_id, 862);
        assert!(result.items.iter().all(|r| r.score.is_some()));
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let recommender = recommender(unused_embedder());

        assert!(matches!(recommender.route("").await, Err(AppError::EmptyInput)));
        assert!(matches!(
            recommender.route(" \t\n").await,
            Err(AppError::EmptyInput)
        ));
    }

    #[tokio::test]
    async fn test_zero_top_n_is_rejected() {
        let recommender = recommender(unused_embedder());
        let result = recommender.route_with_limit("Avatar", 0).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_top_n_limits_title_results() {
        let recommender = recommender(unused_embedder());
        let result = recommender.route_with_limit("Titanic", 2).await.unwrap();
        assert_eq!(result.items.len(), 2);
    }
}
