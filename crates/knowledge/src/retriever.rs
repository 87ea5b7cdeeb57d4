//! Top-k similarity retrieval over the local vector store.

use crate::embeddings::EmbeddingProvider;
use crate::store::VectorStore;
use grounded_core::{AppResult, DocumentChunk};
use std::sync::Arc;

/// Retrieves the chunks most similar to a question from the local index.
pub struct Retriever {
    store: VectorStore,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl Retriever {
    pub fn new(store: VectorStore, embedder: Arc<dyn EmbeddingProvider>, top_k: usize) -> Self {
        Self {
            store,
            embedder,
            top_k,
        }
    }

    /// Retrieve at most `top_k` chunks ordered by descending similarity.
    ///
    /// A missing or empty store yields an empty result, not an error; the
    /// generator is expected to cope with empty context.
    pub async fn retrieve(&self, question: &str) -> AppResult<Vec<DocumentChunk>> {
        if !self.store.exists() {
            tracing::debug!("No vector store on disk; retrieval returns no chunks");
            return Ok(vec![]);
        }

        let query_embedding = self.embedder.embed(question).await?;
        let results = self.store.query(&query_embedding, self.top_k)?;

        tracing::info!("Retrieved {} chunks for question", results.len());

        Ok(results
            .into_iter()
            .map(|(entry, _score)| DocumentChunk {
                content: entry.content,
                metadata: entry.metadata,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::HashEmbedder;
    use crate::types::IndexEntry;
    use std::collections::HashMap;

    async fn entry_for(embedder: &HashEmbedder, text: &str, source: &str) -> IndexEntry {
        let embedding = embedder.embed(text).await.unwrap();
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), source.to_string());
        IndexEntry {
            embedding,
            content: text.to_string(),
            metadata,
        }
    }

    #[tokio::test]
    async fn test_missing_store_returns_empty_for_any_question() {
        let dir = tempfile::tempdir().unwrap();
        let store = VectorStore::open(dir.path().join("index.db"));
        let retriever = Retriever::new(store, Arc::new(HashEmbedder::default()), 1);

        assert!(retriever.retrieve("anything at all").await.unwrap().is_empty());
        assert!(retriever.retrieve("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_returns_at_most_top_k_with_source() {
        let dir = tempfile::tempdir().unwrap();
        let store = VectorStore::open(dir.path().join("index.db"));
        let embedder = HashEmbedder::default();

        store
            .replace_all(&[
                entry_for(&embedder, "the rust borrow checker enforces ownership", "rust.pdf")
                    .await,
                entry_for(&embedder, "pancakes require flour and butter", "cooking.pdf").await,
            ])
            .unwrap();

        let retriever = Retriever::new(store, Arc::new(embedder), 1);
        let chunks = retriever
            .retrieve("how does rust ownership work")
            .await
            .unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].source(), Some("rust.pdf"));
        assert!(chunks[0].content.contains("borrow checker"));
    }
}
