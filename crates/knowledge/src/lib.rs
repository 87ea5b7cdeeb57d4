//! Local knowledge base: ingestion pipeline and retrieval.
//!
//! Documents are parsed, chunked, embedded, and written to a SQLite-backed
//! vector store; the retriever answers top-k similarity queries against it.

pub mod chunker;
pub mod embeddings;
pub mod ingest;
pub mod parser;
pub mod retriever;
pub mod store;
pub mod types;

pub use embeddings::{create_embedder, EmbeddingProvider, HashEmbedder, OllamaEmbedder};
pub use ingest::ingest;
pub use retriever::Retriever;
pub use store::VectorStore;
pub use types::{IndexEntry, IngestStats};
