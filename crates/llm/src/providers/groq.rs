//! Groq LLM provider implementation.
//!
//! Talks to Groq's OpenAI-compatible chat completions endpoint.
//! API: https://console.groq.com/docs/api-reference

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use grounded_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat completions request format (OpenAI-compatible).
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completions response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Groq LLM client.
pub struct GroqClient {
    /// Base URL for the Groq API
    base_url: String,

    /// API key sent as a bearer token
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl GroqClient {
    /// Create a new Groq client with the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a new Groq client with a custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Convert LlmRequest to the chat completions format.
    fn to_chat_request(&self, request: &LlmRequest) -> ChatRequest {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        ChatRequest {
            model: request.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for GroqClient {
    fn provider_name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::debug!(model = %request.model, "Sending completion request to Groq");

        let chat_request = self.to_chat_request(request);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Groq: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Groq API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Groq response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::Llm("Groq response contained no choices".to_string()))?;

        tracing::debug!("Received completion from Groq");

        Ok(LlmResponse {
            content,
            model: chat_response.model,
        })
    }
}
