/// Precomputed model files
///
/// Both models are produced offline and loaded once at startup. They are
/// read-only afterwards and shared across requests behind an `Arc`.
use serde::Deserialize;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
};

/// Title catalog with its pairwise similarity matrix
#[derive(Debug, Clone, Deserialize)]
pub struct TitleModel {
    pub movies: Vec<Movie>,
    /// `similarity[i][j]` is the similarity between rows i and j
    pub similarity: Vec<Vec<f32>>,
}

/// Vibe catalog with one sentence embedding per row
#[derive(Debug, Clone, Deserialize)]
pub struct VibeModel {
    pub movies: Vec<Movie>,
    pub embeddings: Vec<Vec<f32>>,
}

impl TitleModel {
    /// Builds a model from in-memory parts, checking dimensions
    pub fn new(movies: Vec<Movie>, similarity: Vec<Vec<f32>>) -> AppResult<Self> {
        let model = Self { movies, similarity };
        model.validate()?;
        Ok(model)
    }

    /// Reads and validates a title model JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&contents)?;
        model.validate()?;

        tracing::info!(
            path = %path.display(),
            movies = model.movies.len(),
            "Loaded title model"
        );

        Ok(model)
    }

    fn validate(&self) -> AppResult<()> {
        let rows = self.movies.len();

        if self.similarity.len() != rows {
            return Err(AppError::DataInconsistency(format!(
                "title catalog has {} movies but similarity matrix has {} rows",
                rows,
                self.similarity.len()
            )));
        }

        if let Some((i, row)) = self
            .similarity
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != rows)
        {
            return Err(AppError::DataInconsistency(format!(
                "similarity row {} has {} columns, expected {}",
                i,
                row.len(),
                rows
            )));
        }

        Ok(())
    }
}

impl VibeModel {
    /// Builds a model from in-memory parts, checking dimensions
    pub fn new(movies: Vec<Movie>, embeddings: Vec<Vec<f32>>) -> AppResult<Self> {
        let model = Self { movies, embeddings };
        model.validate()?;
        Ok(model)
    }

    /// Reads and validates a vibe model JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&contents)?;
        model.validate()?;

        let out_of_range = model
            .movies
            .iter()
            .filter(|m| !(0.0..=1.0).contains(&m.tone_score))
            .count();
        if out_of_range > 0 {
            tracing::warn!(
                count = out_of_range,
                "Tone scores outside [0, 1]; tone bias may suppress or over-amplify these movies"
            );
        }

        tracing::info!(
            path = %path.display(),
            movies = model.movies.len(),
            dimension = model.dimension(),
            "Loaded vibe model"
        );

        Ok(model)
    }

    /// Embedding width, or 0 for an empty table
    pub fn dimension(&self) -> usize {
        self.embeddings.first().map(Vec::len).unwrap_or(0)
    }

    fn validate(&self) -> AppResult<()> {
        if self.embeddings.len() != self.movies.len() {
            return Err(AppError::DataInconsistency(format!(
                "vibe catalog has {} movies but embedding table has {} rows",
                self.movies.len(),
                self.embeddings.len()
            )));
        }

        let dimension = self.dimension();
        if let Some((i, row)) = self
            .embeddings
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != dimension)
        {
            return Err(AppError::DataInconsistency(format!(
                "embedding row {} has dimension {}, expected {}",
                i,
                row.len(),
                dimension
            )));
        }

        Ok(())
    }
}
