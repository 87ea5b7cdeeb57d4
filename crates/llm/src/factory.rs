//! LLM provider factory.
//!
//! Creates LLM clients from the configured provider name, resolving
//! endpoints and required secrets.

use crate::client::LlmClient;
use crate::providers::{GroqClient, OllamaClient};
use grounded_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("groq", "ollama")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - Optional API key (required for Groq)
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "groq" => {
            let api_key = api_key
                .ok_or_else(|| AppError::Config("Groq provider requires an API key".to_string()))?;
            let client = match endpoint {
                Some(endpoint) => GroqClient::with_base_url(api_key, endpoint),
                None => GroqClient::new(api_key),
            };
            Ok(Arc::new(client))
        }
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            Ok(Arc::new(OllamaClient::with_base_url(base_url)))
        }
        other => Err(AppError::Config(format!("Unknown LLM provider: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client("ollama", None, None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_groq_requires_api_key() {
        match create_client("groq", None, None) {
            Err(err) => assert!(err.to_string().contains("API key")),
            Ok(_) => panic!("Expected error for Groq without API key"),
        }
    }

    #[test]
    fn test_create_groq_with_key() {
        let client = create_client("groq", None, Some("key"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, None) {
            Err(err) => assert!(err.to_string().contains("Unknown LLM provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
