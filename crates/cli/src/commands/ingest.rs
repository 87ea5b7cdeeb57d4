//! Ingest command handler.
//!
//! Indexes the knowledge directory into the local vector store.

use clap::Args;
use grounded_core::{config::AppConfig, AppResult};
use grounded_knowledge::{create_embedder, ingest, VectorStore};
use std::path::PathBuf;

/// Index the knowledge directory into the local store
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Source directory (default: the configured knowledge directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ingest command");
        tracing::debug!("Ingest command options: {:?}", self);

        let source_dir = self.dir.clone().unwrap_or_else(|| config.knowledge_path());
        let embedder = create_embedder(&config.embedding_provider, None, &config.embedding_model)?;
        let store = VectorStore::open(config.index_path());

        let stats = ingest(
            &source_dir,
            &store,
            embedder.as_ref(),
            config.chunk_size,
            config.chunk_overlap,
        )
        .await?;

        if self.json {
            let output = serde_json::json!({
                "documents": stats.documents,
                "chunks": stats.chunks,
                "durationSecs": stats.duration_secs,
                "index": config.index_path(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "Indexed {} documents ({} chunks) in {:.1}s",
                stats.documents, stats.chunks, stats.duration_secs
            );
        }

        Ok(())
    }
}
