//! Web search retrieval branch.
//!
//! Queries a search provider, fetches the result pages concurrently,
//! extracts their text, and tags every chunk with the originating URL.

pub mod fetch;
pub mod provider;

use futures::future::join_all;
use grounded_core::{AppResult, DocumentChunk};
use std::sync::Arc;

pub use fetch::{extract_page_text, HttpPageFetcher, PageFetcher};
pub use provider::{SearchHit, SearchProvider, TavilyClient};

/// Searches the web for a question and turns the result pages into
/// document chunks.
pub struct WebSearchFetcher {
    provider: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    domains: Vec<String>,
    max_results: usize,
}

impl WebSearchFetcher {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        domains: Vec<String>,
        max_results: usize,
    ) -> Self {
        Self {
            provider,
            fetcher,
            domains,
            max_results,
        }
    }

    /// Search the web and return one chunk per successfully fetched page,
    /// in provider ranking order.
    ///
    /// A provider failure, a failed fetch, or an empty page never aborts
    /// the rest; if everything fails the result is simply empty.
    pub async fn search(&self, question: &str) -> AppResult<Vec<DocumentChunk>> {
        let hits = match self
            .provider
            .search(question, &self.domains, self.max_results)
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!("Search provider failed: {}", e);
                return Ok(vec![]);
            }
        };

        if hits.is_empty() {
            tracing::info!("Search provider returned no results");
            return Ok(vec![]);
        }

        tracing::info!("Fetching {} search result pages", hits.len());

        // Fetches are independent; fan out concurrently, bounded by the
        // number of hits. join_all preserves input order, which keeps the
        // provider ranking.
        let fetches = hits.iter().map(|hit| self.fetch_chunk(hit));
        let chunks: Vec<DocumentChunk> = join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .collect();

        tracing::info!("Web search produced {} chunks", chunks.len());
        Ok(chunks)
    }

    /// Fetch one result page and convert it to a chunk, tagging the source
    /// URL. Returns None on any per-URL failure.
    async fn fetch_chunk(&self, hit: &SearchHit) -> Option<DocumentChunk> {
        let html = match self.fetcher.fetch(&hit.url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", hit.url, e);
                return None;
            }
        };

        let text = extract_page_text(&html);
        if text.trim().is_empty() {
            tracing::warn!("Skipping {}: no extractable text", hit.url);
            return None;
        }

        let mut chunk = DocumentChunk::new(text, hit.url.clone());
        if let Some(snippet) = &hit.snippet {
            chunk = chunk.with_metadata("snippet", snippet.clone());
        }
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grounded_core::AppError;
    use std::collections::HashMap;

    struct StaticProvider {
        hits: AppResult<Vec<SearchHit>>,
    }

    #[async_trait::async_trait]
    impl SearchProvider for StaticProvider {
        fn provider_name(&self) -> &str {
            "static"
        }

        async fn search(
            &self,
            _query: &str,
            _domains: &[String],
            _max_results: usize,
        ) -> AppResult<Vec<SearchHit>> {
            match &self.hits {
                Ok(hits) => Ok(hits.clone()),
                Err(_) => Err(AppError::Search("provider down".to_string())),
            }
        }
    }

    /// Serves canned HTML per URL; unknown URLs fail.
    struct StaticFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait::async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> AppResult<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::Search(format!("Fetch of {} failed", url)))
        }
    }

    fn hit(url: &str) -> SearchHit {
        SearchHit {
            url: url.to_string(),
            snippet: None,
        }
    }

    #[tokio::test]
    async fn test_partial_fetch_failures_are_skipped() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://c.example".to_string(),
            "<p>only survivor</p>".to_string(),
        );

        let fetcher = WebSearchFetcher::new(
            Arc::new(StaticProvider {
                hits: Ok(vec![
                    hit("https://a.example"),
                    hit("https://b.example"),
                    hit("https://c.example"),
                ]),
            }),
            Arc::new(StaticFetcher { pages }),
            vec![],
            3,
        );

        let chunks = fetcher.search("q").await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].source(), Some("https://c.example"));
        assert!(chunks[0].content.contains("only survivor"));
    }

    #[tokio::test]
    async fn test_provider_failure_yields_empty_not_error() {
        let fetcher = WebSearchFetcher::new(
            Arc::new(StaticProvider {
                hits: Err(AppError::Search("down".to_string())),
            }),
            Arc::new(StaticFetcher {
                pages: HashMap::new(),
            }),
            vec![],
            3,
        );

        assert!(fetcher.search("q").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_fetches_failing_yields_empty() {
        let fetcher = WebSearchFetcher::new(
            Arc::new(StaticProvider {
                hits: Ok(vec![hit("https://a.example"), hit("https://b.example")]),
            }),
            Arc::new(StaticFetcher {
                pages: HashMap::new(),
            }),
            vec![],
            2,
        );

        assert!(fetcher.search("q").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_result_order_follows_provider_ranking() {
        let mut pages = HashMap::new();
        pages.insert("https://first.example".to_string(), "<p>first</p>".to_string());
        pages.insert(
            "https://second.example".to_string(),
            "<p>second</p>".to_string(),
        );

        let fetcher = WebSearchFetcher::new(
            Arc::new(StaticProvider {
                hits: Ok(vec![hit("https://first.example"), hit("https://second.example")]),
            }),
            Arc::new(StaticFetcher { pages }),
            vec![],
            2,
        );

        let chunks = fetcher.search("q").await.unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].source(), Some("https://first.example"));
        assert_eq!(chunks[1].source(), Some("https://second.example"));
    }

    #[tokio::test]
    async fn test_snippet_is_carried_in_metadata() {
        let mut pages = HashMap::new();
        pages.insert("https://a.example".to_string(), "<p>body</p>".to_string());

        let fetcher = WebSearchFetcher::new(
            Arc::new(StaticProvider {
                hits: Ok(vec![SearchHit {
                    url: "https://a.example".to_string(),
                    snippet: Some("a snippet".to_string()),
                }]),
            }),
            Arc::new(StaticFetcher { pages }),
            vec![],
            1,
        );

        let chunks = fetcher.search("q").await.unwrap();
        assert_eq!(
            chunks[0].metadata.get("snippet").map(String::as_str),
            Some("a snippet")
        );
    }
}
