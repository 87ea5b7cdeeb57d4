//! Context-grounded answer generation.

use grounded_core::{AppError, AppResult, DocumentChunk};
use grounded_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

/// Generates an answer from a question and its retrieval context.
pub struct Generator {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl Generator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn prompt(question: &str, documents: &[DocumentChunk]) -> String {
        let context = documents
            .iter()
            .map(|chunk| chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("Context: {}\n\nQuestion: {}\n\nAnswer:", context, question)
    }

    /// Generate an answer for `question` grounded in `documents`.
    ///
    /// Empty context is allowed; the model answers from the question alone.
    pub async fn generate(
        &self,
        question: &str,
        documents: &[DocumentChunk],
    ) -> AppResult<String> {
        tracing::debug!(chunks = documents.len(), "Generating answer");

        let request = LlmRequest::new(Self::prompt(question, documents), &self.model);
        let response = self
            .client
            .complete(&request)
            .await
            .map_err(|e| AppError::Generation(format!("Generation request failed: {}", e)))?;

        Ok(response.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_joins_context_with_blank_lines() {
        let documents = vec![
            DocumentChunk::new("first chunk", "a.txt"),
            DocumentChunk::new("second chunk", "b.txt"),
        ];
        let prompt = Generator::prompt("what?", &documents);
        assert_eq!(
            prompt,
            "Context: first chunk\n\nsecond chunk\n\nQuestion: what?\n\nAnswer:"
        );
    }

    #[test]
    fn test_prompt_with_empty_context() {
        let prompt = Generator::prompt("what?", &[]);
        assert_eq!(prompt, "Context: \n\nQuestion: what?\n\nAnswer:");
    }
}
