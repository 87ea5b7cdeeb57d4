//! Document ingestion pipeline.
//!
//! Enumerates supported files in a source directory (non-recursive), parses
//! each into text, splits the text into overlapping chunks, embeds every
//! chunk, and replaces the persistent store's contents wholesale.

use crate::chunker;
use crate::embeddings::EmbeddingProvider;
use crate::parser::{self, SourceKind};
use crate::store::VectorStore;
use crate::types::{IndexEntry, IngestStats};
use grounded_core::{AppResult, SOURCE_KEY};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use walkdir::WalkDir;

/// Ingest a source directory into the vector store.
///
/// Files that fail to parse are logged and skipped; the run never aborts on
/// a single bad document. A missing directory, or a directory with nothing
/// parseable, returns zero-document stats and leaves the store untouched.
pub async fn ingest(
    source_dir: &Path,
    store: &VectorStore,
    embedder: &dyn EmbeddingProvider,
    chunk_size: usize,
    chunk_overlap: usize,
) -> AppResult<IngestStats> {
    let start = Instant::now();

    if !source_dir.exists() {
        tracing::warn!("Source directory {:?} does not exist; nothing to index", source_dir);
        return Ok(IngestStats::empty());
    }

    tracing::info!("Starting ingestion from {:?}", source_dir);

    let mut documents = 0u32;
    let mut entries: Vec<IndexEntry> = Vec::new();
    let ingested_at = chrono::Utc::now().to_rfc3339();

    for dir_entry in WalkDir::new(source_dir)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = dir_entry.path();
        if !path.is_file() || SourceKind::from_path(path) == SourceKind::Unsupported {
            continue;
        }

        let text = match parser::parse_file(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                continue;
            }
        };

        if text.trim().is_empty() {
            tracing::warn!("Skipping {:?}: no extractable text", path);
            continue;
        }

        let chunks = chunker::chunk_text(&text, chunk_size, chunk_overlap);
        let embeddings = embedder.embed_batch(&chunks).await?;

        let source = path.to_string_lossy().to_string();
        for (position, (chunk, embedding)) in chunks.into_iter().zip(embeddings).enumerate() {
            let mut metadata = HashMap::new();
            metadata.insert(SOURCE_KEY.to_string(), source.clone());
            metadata.insert("position".to_string(), position.to_string());
            metadata.insert("ingested_at".to_string(), ingested_at.clone());
            entries.push(IndexEntry {
                embedding,
                content: chunk,
                metadata,
            });
        }

        documents += 1;
        tracing::debug!("Processed {:?}", path);
    }

    if entries.is_empty() {
        tracing::info!("No parseable documents under {:?}; store left untouched", source_dir);
        return Ok(IngestStats {
            documents,
            chunks: 0,
            duration_secs: start.elapsed().as_secs_f64(),
        });
    }

    let chunks = entries.len() as u32;
    store.replace_all(&entries)?;

    let duration_secs = start.elapsed().as_secs_f64();
    tracing::info!(
        "Ingestion completed: {} documents, {} chunks in {:.2}s",
        documents,
        chunks,
        duration_secs
    );

    Ok(IngestStats {
        documents,
        chunks,
        duration_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::HashEmbedder;

    fn store_in(dir: &Path) -> VectorStore {
        VectorStore::open(dir.join("state").join("index.db"))
    }

    #[tokio::test]
    async fn test_missing_directory_yields_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let embedder = HashEmbedder::default();

        let stats = ingest(&dir.path().join("nope"), &store, &embedder, 1000, 200)
            .await
            .unwrap();
        assert_eq!(stats.documents, 0);
        assert!(!store.exists());
    }

    #[tokio::test]
    async fn test_empty_directory_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let sources = dir.path().join("docs");
        std::fs::create_dir(&sources).unwrap();
        let store = store_in(dir.path());
        let embedder = HashEmbedder::default();

        // Seed the store, then ingest an empty directory
        store
            .replace_all(&[IndexEntry {
                embedding: vec![1.0, 0.0],
                content: "seed".to_string(),
                metadata: HashMap::new(),
            }])
            .unwrap();

        let stats = ingest(&sources, &store, &embedder, 1000, 200).await.unwrap();
        assert_eq!(stats.documents, 0);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ingest_counts_documents_and_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let sources = dir.path().join("docs");
        std::fs::create_dir(&sources).unwrap();
        // 1800 chars with size 1000 / overlap 200 -> chunks at 0 and 800
        std::fs::write(sources.join("long.txt"), "a".repeat(1800)).unwrap();
        std::fs::write(sources.join("short.txt"), "hello world").unwrap();
        std::fs::write(sources.join("binary.bin"), [0u8, 159, 146]).unwrap();

        let store = store_in(dir.path());
        let embedder = HashEmbedder::default();
        let stats = ingest(&sources, &store, &embedder, 1000, 200).await.unwrap();

        assert_eq!(stats.documents, 2);
        assert_eq!(stats.chunks, 3);
        assert_eq!(store.len().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_ingest_is_deterministic_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let sources = dir.path().join("docs");
        std::fs::create_dir(&sources).unwrap();
        std::fs::write(sources.join("doc.txt"), "b".repeat(2500)).unwrap();

        let store = store_in(dir.path());
        let embedder = HashEmbedder::default();

        let first = ingest(&sources, &store, &embedder, 1000, 200).await.unwrap();
        let count_after_first = store.len().unwrap();
        let second = ingest(&sources, &store, &embedder, 1000, 200).await.unwrap();

        assert_eq!(first.documents, second.documents);
        assert_eq!(first.chunks, second.chunks);
        // Full-replace semantics: no duplication across runs
        assert_eq!(store.len().unwrap(), count_after_first);
    }

    #[tokio::test]
    async fn test_unparseable_file_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let sources = dir.path().join("docs");
        std::fs::create_dir(&sources).unwrap();
        std::fs::write(sources.join("broken.pdf"), b"not a real pdf").unwrap();
        std::fs::write(sources.join("good.txt"), "useful text").unwrap();

        let store = store_in(dir.path());
        let embedder = HashEmbedder::default();
        let stats = ingest(&sources, &store, &embedder, 1000, 200).await.unwrap();

        assert_eq!(stats.documents, 1);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_nested_directories_are_not_descended() {
        let dir = tempfile::tempdir().unwrap();
        let sources = dir.path().join("docs");
        std::fs::create_dir_all(sources.join("nested")).unwrap();
        std::fs::write(sources.join("top.txt"), "top level").unwrap();
        std::fs::write(sources.join("nested").join("deep.txt"), "nested").unwrap();

        let store = store_in(dir.path());
        let embedder = HashEmbedder::default();
        let stats = ingest(&sources, &store, &embedder, 1000, 200).await.unwrap();

        assert_eq!(stats.documents, 1);
    }
}
