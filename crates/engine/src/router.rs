//! LLM-backed question routing.

use crate::state::RouteDecision;
use grounded_core::{AppError, AppResult};
use grounded_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

/// Classifies questions into a retrieval branch with a single LLM call.
pub struct Router {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl Router {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn prompt(question: &str) -> String {
        format!(
            "Route the question: '{}'. Categories: 'vectorstore' or 'web_search'. \
             Respond with one word.",
            question
        )
    }

    /// Ask the classifier which branch should answer `question`.
    pub async fn route(&self, question: &str) -> AppResult<RouteDecision> {
        let request = LlmRequest::new(Self::prompt(question), &self.model).with_temperature(0.0);

        let response = self
            .client
            .complete(&request)
            .await
            .map_err(|e| AppError::Routing(format!("Routing request failed: {}", e)))?;

        let decision = RouteDecision::from_response(&response.content);
        tracing::info!(
            decision = decision.as_str(),
            raw = %response.content.trim(),
            "Routed question"
        );
        Ok(decision)
    }
}
