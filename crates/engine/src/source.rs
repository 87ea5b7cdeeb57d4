//! The seam between the workflow and its two retrieval branches.

use grounded_core::{AppResult, DocumentChunk};
use grounded_knowledge::Retriever;
use grounded_search::WebSearchFetcher;

/// A branch that turns a question into context documents.
///
/// Both the local index and the web search branch sit behind this trait so
/// the workflow can run either without knowing which.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    /// Name used in logs (e.g., "vectorstore", "web_search").
    fn source_name(&self) -> &str;

    /// Gather context documents for a question. An empty result is valid.
    async fn gather(&self, question: &str) -> AppResult<Vec<DocumentChunk>>;
}

#[async_trait::async_trait]
impl DocumentSource for Retriever {
    fn source_name(&self) -> &str {
        "vectorstore"
    }

    async fn gather(&self, question: &str) -> AppResult<Vec<DocumentChunk>> {
        self.retrieve(question).await
    }
}

#[async_trait::async_trait]
impl DocumentSource for WebSearchFetcher {
    fn source_name(&self) -> &str {
        "web_search"
    }

    async fn gather(&self, question: &str) -> AppResult<Vec<DocumentChunk>> {
        self.search(question).await
    }
}
