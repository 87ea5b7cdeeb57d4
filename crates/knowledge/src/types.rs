//! Data types for the ingestion pipeline and vector store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Persisted unit in the vector store.
///
/// Entries are created only by the ingestion pipeline and are read-only to
/// the retriever. A re-ingestion replaces the store's contents wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Fixed-length embedding vector
    pub embedding: Vec<f32>,

    /// The chunk text
    pub content: String,

    /// Provenance metadata (`source`, `position`, `ingested_at`)
    pub metadata: HashMap<String, String>,
}

/// Outcome of an ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestStats {
    /// Number of source documents that yielded text
    pub documents: u32,

    /// Number of chunks written to the store
    pub chunks: u32,

    /// Wall-clock duration of the run
    pub duration_secs: f64,
}

impl IngestStats {
    /// Stats for a run that found nothing to index.
    pub fn empty() -> Self {
        Self {
            documents: 0,
            chunks: 0,
            duration_secs: 0.0,
        }
    }
}
