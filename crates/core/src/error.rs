//! Error types for Grounded.
//!
//! This module defines a unified error enum covering every failure category
//! in the application: configuration, I/O, LLM calls, routing, retrieval,
//! web search, answer generation, and ingestion.

use thiserror::Error;

/// Unified error type for Grounded.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Question classification failed (language-model call during routing)
    #[error("Routing error: {0}")]
    Routing(String),

    /// Vector index errors (open, write, query)
    #[error("Index error: {0}")]
    Index(String),

    /// Web search provider or page fetch errors
    #[error("Search error: {0}")]
    Search(String),

    /// Answer synthesis failed (language-model call during generation)
    #[error("Generation error: {0}")]
    Generation(String),

    /// Document ingestion errors
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
