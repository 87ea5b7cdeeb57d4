//! Page fetching and HTML text extraction.

use grounded_core::{AppError, AppResult};
use scraper::{Html, Selector};
use std::time::Duration;

/// Request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 20;

/// Elements whose text content is worth keeping. Container elements are
/// left out so nested text is not collected twice.
const TEXT_SELECTORS: &str = "h1, h2, h3, h4, h5, h6, p, li, td, th, pre";

/// Trait for fetching a page's raw HTML.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url` and return its body. May fail per-URL.
    async fn fetch(&self, url: &str) -> AppResult<String>;
}

/// HTTP page fetcher.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Failed to build fetch client, falling back to defaults: {}", e);
                reqwest::Client::new()
            }
        };
        Self { client }
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Search(format!(
                "Fetch of {} returned status {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Search(format!("Failed to read body of {}: {}", url, e)))
    }
}

/// Extract readable text from an HTML document.
///
/// Walks content-bearing elements in document order and joins their text,
/// which drops scripts, styles, and markup noise along the way.
pub fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<String> = Vec::new();

    if let Ok(selector) = Selector::parse(TEXT_SELECTORS) {
        for element in document.select(&selector) {
            let text = element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");

            if !text.is_empty() {
                parts.push(text);
            }
        }
    }

    parts.join("\n")
}
