//! Embedding provider abstraction.
//!
//! Embeddings must be deterministic for identical input and model, so the
//! same provider serves both ingestion and query-time encoding.

pub mod providers;

use grounded_core::{AppError, AppResult};
use std::sync::Arc;

pub use providers::{HashEmbedder, OllamaEmbedder};

/// Trait for embedding backends.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the provider name (e.g., "ollama", "hash").
    fn provider_name(&self) -> &str;

    /// Length of the vectors this provider produces.
    fn dimensions(&self) -> usize;

    /// Embed a single text into a fixed-length vector.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;

    /// Embed a batch of texts, preserving input order.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }
}

/// Create an embedding provider based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("ollama", "hash")
/// * `endpoint` - Optional custom endpoint URL (Ollama only)
/// * `model` - Embedding model identifier
pub fn create_embedder(
    provider: &str,
    endpoint: Option<&str>,
    model: &str,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            Ok(Arc::new(OllamaEmbedder::new(base_url, model)))
        }
        "hash" => Ok(Arc::new(HashEmbedder::default())),
        other => Err(AppError::Config(format!(
            "Unknown embedding provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_hash_embedder() {
        let embedder = create_embedder("hash", None, "").unwrap();
        assert_eq!(embedder.provider_name(), "hash");
    }

    #[test]
    fn test_create_ollama_embedder() {
        let embedder = create_embedder("ollama", None, "nomic-embed-text").unwrap();
        assert_eq!(embedder.provider_name(), "ollama");
    }

    #[test]
    fn test_unknown_embedder() {
        assert!(create_embedder("nope", None, "m").is_err());
    }
}
