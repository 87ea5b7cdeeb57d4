//! Shared data types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key carrying the provenance of a chunk: a file path for indexed
/// content, a URL for web content.
pub const SOURCE_KEY: &str = "source";

/// A unit of retrievable text with provenance metadata.
///
/// Chunks are immutable once created; both retrieval branches produce them
/// and the generator consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// The chunk text.
    pub content: String,

    /// Provenance metadata. Always contains at least [`SOURCE_KEY`].
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl DocumentChunk {
    /// Create a chunk with content and a source identifier.
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(SOURCE_KEY.to_string(), source.into());
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Attach a single metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The provenance identifier, if recorded.
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE_KEY).map(String::as_str)
    }
}
