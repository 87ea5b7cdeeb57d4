//! SQLite-backed persistent vector store.
//!
//! The store holds embedded chunks and supports top-k similarity queries
//! via a linear cosine scan. A re-ingestion replaces the contents wholesale
//! using build-then-swap: the new database is written to a temporary file
//! and renamed over the live path, so a concurrent reader observes either
//! the old or the new store, never a partially written one.

use crate::types::IndexEntry;
use grounded_core::{AppError, AppResult};
use rusqlite::{params, Connection, OpenFlags};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Handle to the persistent vector store at a configured location.
///
/// The handle itself holds no connection; each operation opens the database
/// file, which keeps concurrent requests free of shared mutable state.
#[derive(Debug, Clone)]
pub struct VectorStore {
    path: PathBuf,
}

impl VectorStore {
    /// Create a handle for the store at `path`. The file need not exist;
    /// a missing store is equivalent to an empty one for queries.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a persisted store exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Replace the store's entire contents with `entries`.
    ///
    /// Builds a fresh database beside the live one and atomically renames
    /// it into place.
    pub fn replace_all(&self, entries: &[IndexEntry]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Index(format!("Failed to create store directory: {}", e)))?;
        }

        let tmp_path = self.path.with_extension("db.tmp");
        if tmp_path.exists() {
            std::fs::remove_file(&tmp_path)
                .map_err(|e| AppError::Index(format!("Failed to remove stale temp store: {}", e)))?;
        }

        // Scope the connection so the file is closed before the rename
        {
            let conn = Connection::open(&tmp_path)
                .map_err(|e| AppError::Index(format!("Failed to create store: {}", e)))?;

            conn.execute_batch(
                r#"
                CREATE TABLE entries (
                    id INTEGER PRIMARY KEY,
                    content TEXT NOT NULL,
                    embedding BLOB NOT NULL,
                    metadata TEXT NOT NULL
                );
                "#,
            )
            .map_err(|e| AppError::Index(format!("Failed to create schema: {}", e)))?;

            let tx = conn
                .unchecked_transaction()
                .map_err(|e| AppError::Index(format!("Failed to begin transaction: {}", e)))?;

            for entry in entries {
                let metadata_json = serde_json::to_string(&entry.metadata)?;
                tx.execute(
                    "INSERT INTO entries (content, embedding, metadata) VALUES (?1, ?2, ?3)",
                    params![
                        entry.content,
                        embedding_to_bytes(&entry.embedding),
                        metadata_json,
                    ],
                )
                .map_err(|e| AppError::Index(format!("Failed to insert entry: {}", e)))?;
            }

            tx.commit()
                .map_err(|e| AppError::Index(format!("Failed to commit entries: {}", e)))?;
        }

        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| AppError::Index(format!("Failed to swap store into place: {}", e)))?;

        tracing::info!("Replaced vector store at {:?} ({} entries)", self.path, entries.len());
        Ok(())
    }

    /// Query the store for the top-k entries most similar to the embedding.
    ///
    /// Returns entries ordered by descending cosine similarity. A missing
    /// store yields an empty result, not an error.
    pub fn query(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<(IndexEntry, f32)>> {
        if !self.exists() {
            tracing::debug!("Vector store {:?} does not exist; returning no matches", self.path);
            return Ok(vec![]);
        }

        let conn = self.open_read_only()?;
        let mut stmt = conn
            .prepare("SELECT content, embedding, metadata FROM entries")
            .map_err(|e| AppError::Index(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                let content: String = row.get(0)?;
                let embedding_bytes: Vec<u8> = row.get(1)?;
                let metadata_json: String = row.get(2)?;
                Ok((content, embedding_bytes, metadata_json))
            })
            .map_err(|e| AppError::Index(format!("Failed to query entries: {}", e)))?;

        let mut results: Vec<(IndexEntry, f32)> = Vec::new();
        for row in rows {
            let (content, embedding_bytes, metadata_json) =
                row.map_err(|e| AppError::Index(format!("Failed to read entry: {}", e)))?;
            let embedding = bytes_to_embedding(&embedding_bytes)?;
            let metadata: HashMap<String, String> = serde_json::from_str(&metadata_json)?;
            let score = cosine_similarity(query_embedding, &embedding);
            results.push((
                IndexEntry {
                    embedding,
                    content,
                    metadata,
                },
                score,
            ));
        }

        results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        tracing::debug!("Retrieved {} entries (requested top-{})", results.len(), top_k);
        Ok(results)
    }

    /// Number of entries in the store. A missing store counts as zero.
    pub fn len(&self) -> AppResult<u64> {
        if !self.exists() {
            return Ok(0);
        }
        let conn = self.open_read_only()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
            .map_err(|e| AppError::Index(format!("Failed to count entries: {}", e)))?;
        Ok(count as u64)
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len()? == 0)
    }

    /// On-disk size of the store in bytes.
    pub fn size_bytes(&self) -> u64 {
        std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn open_read_only(&self) -> AppResult<Connection> {
        Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| AppError::Index(format!("Failed to open store: {}", e)))
    }
}

/// Convert an embedding vector to little-endian bytes for storage.
fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for &value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Convert stored bytes back to an embedding vector.
fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Index("Invalid embedding bytes length".to_string()));
    }

    let mut embedding = Vec::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        embedding.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Ok(embedding)
}

/// Calculate cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
