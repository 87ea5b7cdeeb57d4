//! Stats command handler.
//!
//! Shows the state of the local vector store.

use clap::Args;
use grounded_core::{config::AppConfig, AppResult};
use grounded_knowledge::VectorStore;

/// Show index statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let store = VectorStore::open(config.index_path());

        if !store.exists() {
            if self.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "indexed": false,
                        "chunks": 0,
                    }))?
                );
            } else {
                println!("No index found. Run `grounded ingest` first.");
            }
            return Ok(());
        }

        let chunks = store.len()?;
        let size_bytes = store.size_bytes();

        if self.json {
            let output = serde_json::json!({
                "indexed": true,
                "chunks": chunks,
                "sizeBytes": size_bytes,
                "path": config.index_path(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Index: {:?}", config.index_path());
            println!("Chunks: {}", chunks);
            println!("Size: {} bytes", size_bytes);
        }

        Ok(())
    }
}
