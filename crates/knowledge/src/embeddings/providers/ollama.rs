//! Ollama embedding provider.
//!
//! Semantic embeddings via Ollama's local API using models like
//! nomic-embed-text.

use crate::embeddings::EmbeddingProvider;
use grounded_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// nomic-embed-text produces 768-dimensional vectors.
const DEFAULT_DIMENSIONS: usize = 768;

/// Request payload for the Ollama embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    prompt: String,
}

/// Response from the Ollama embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Ollama embedding provider using the local API.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create a new provider against a base URL and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(
                    "Failed to build embedding client, falling back to defaults: {}",
                    e
                );
                reqwest::Client::new()
            }
        };

        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            dimensions: DEFAULT_DIMENSIONS,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send embedding request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Ollama embeddings API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse embedding response: {}", e)))?;

        if parsed.embedding.is_empty() {
            return Err(AppError::Llm(
                "Ollama returned an empty embedding".to_string(),
            ));
        }

        Ok(parsed.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_creation() {
        let embedder = OllamaEmbedder::new("http://localhost:11434", "nomic-embed-text");
        assert_eq!(embedder.provider_name(), "ollama");
        assert_eq!(embedder.dimensions(), DEFAULT_DIMENSIONS);
        assert_eq!(embedder.model, "nomic-embed-text");
    }
}
