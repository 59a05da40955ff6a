/// Sentence embeddings from an Ollama-compatible server
///
/// API Flow:
/// POST {api_url}/api/embed with `{ "model", "input" }` → `{ "embeddings": [[...]] }`
///
/// Older servers answer with a single `embedding` array instead; both shapes
/// are accepted.
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    services::providers::Embedder,
};

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

impl EmbedResponse {
    fn into_vector(self) -> Option<Vec<f32>> {
        self.embeddings
            .into_iter()
            .next()
            .or(self.embedding)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Clone)]
pub struct OllamaEmbedder {
    http_client: HttpClient,
    api_url: String,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(api_url: String, model: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[async_trait::async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}/api/embed", self.api_url);

        let response = self
            .http_client
            .post(&url)
            .json(&EmbedRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Embedding(format!(
                "Embedding server returned status {}: {}",
                status, body
            )));
        }

        let vector = response
            .json::<EmbedResponse>()
            .await?
            .into_vector()
            .ok_or_else(|| {
                AppError::Embedding(format!("Model '{}' returned no embedding", self.model))
            })?;

        tracing::debug!(
            model = %self.model,
            dimension = vector.len(),
            provider = "ollama",
            "Query embedded"
        );

        Ok(vector)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
