//! Web search provider abstraction and the Tavily implementation.

use grounded_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// A single search result from the provider, in provider ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result page URL
    pub url: String,

    /// Short content snippet, when the provider supplies one
    pub snippet: Option<String>,
}

/// Trait for web search providers.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Get the provider name (e.g., "tavily").
    fn provider_name(&self) -> &str;

    /// Query the provider, restricted to `domains` when non-empty and
    /// bounded to `max_results` hits. Results follow the provider ranking.
    async fn search(
        &self,
        query: &str,
        domains: &[String],
        max_results: usize,
    ) -> AppResult<Vec<SearchHit>>;
}

/// Tavily search API request format.
#[derive(Debug, Serialize)]
struct TavilyRequest {
    api_key: String,
    query: String,
    max_results: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    include_domains: Vec<String>,
}

/// Tavily search API response format.
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    #[serde(default)]
    content: Option<String>,
}

/// Tavily search client.
pub struct TavilyClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl TavilyClient {
    /// Create a new Tavily client with the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a new Tavily client with a custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for TavilyClient {
    fn provider_name(&self) -> &str {
        "tavily"
    }

    async fn search(
        &self,
        query: &str,
        domains: &[String],
        max_results: usize,
    ) -> AppResult<Vec<SearchHit>> {
        tracing::debug!(query, max_results, "Sending search request to Tavily");

        let request = TavilyRequest {
            api_key: self.api_key.clone(),
            query: query.to_string(),
            max_results,
            include_domains: domains.to_vec(),
        };

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Failed to send search request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Search(format!(
                "Tavily API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse search response: {}", e)))?;

        Ok(parsed
            .results
            .into_iter()
            .take(max_results)
            .map(|r| SearchHit {
                url: r.url,
                snippet: r.content,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tavily_client_creation() {
        let client = TavilyClient::new("key");
        assert_eq!(client.provider_name(), "tavily");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_response_parsing_tolerates_missing_fields() {
        let parsed: TavilyResponse =
            serde_json::from_str(r#"{"results": [{"url": "https://a.example"}]}"#).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].url, "https://a.example");
        assert!(parsed.results[0].content.is_none());

        let empty: TavilyResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.results.is_empty());
    }
}
