//! Ask command handler.
//!
//! Assembles the workflow from the configured providers and runs a single
//! question through it.

use clap::Args;
use futures::StreamExt;
use grounded_core::{config::AppConfig, AppResult};
use grounded_engine::{Generator, RequestState, Router, Workflow};
use grounded_knowledge::{create_embedder, Retriever, VectorStore};
use grounded_llm::create_client;
use grounded_search::{HttpPageFetcher, TavilyClient, WebSearchFetcher};
use std::sync::Arc;

/// Ask a question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Print a state snapshot after each workflow step
    #[arg(long)]
    pub stream: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let workflow = Arc::new(build_workflow(config)?);

        if self.stream {
            let mut stream = workflow.stream(&self.question);
            let mut final_state = None;
            while let Some(state) = stream.next().await {
                self.print_snapshot(&state)?;
                final_state = Some(state);
            }
            if let Some(state) = final_state {
                if !self.json {
                    println!();
                    println!("{}", state.answer.as_deref().unwrap_or(""));
                }
            }
        } else {
            let state = workflow.run(&self.question).await;
            self.print_final(&state)?;
        }

        Ok(())
    }

    fn print_snapshot(&self, state: &RequestState) -> AppResult<()> {
        if self.json {
            println!("{}", serde_json::to_string(state)?);
        } else {
            eprintln!(
                "[{}] documents: {}, answer: {}",
                state.last_step.as_str(),
                state.documents.len(),
                if state.answer.is_some() { "ready" } else { "pending" }
            );
        }
        Ok(())
    }

    fn print_final(&self, state: &RequestState) -> AppResult<()> {
        if self.json {
            let sources: Vec<&str> = state
                .documents
                .iter()
                .filter_map(|chunk| chunk.source())
                .collect();
            let output = serde_json::json!({
                "question": state.question,
                "answer": state.answer,
                "sources": sources,
                "lastStep": state.last_step.as_str(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", state.answer.as_deref().unwrap_or(""));
        }
        Ok(())
    }
}

/// Wire the configured providers into a workflow.
fn build_workflow(config: &AppConfig) -> AppResult<Workflow> {
    let client = create_client(&config.provider, None, config.api_key.as_deref())?;
    let embedder = create_embedder(&config.embedding_provider, None, &config.embedding_model)?;

    let store = VectorStore::open(config.index_path());
    let retriever = Arc::new(Retriever::new(store, embedder, config.top_k));

    if config.search_api_key.is_none() {
        tracing::warn!("TAVILY_API_KEY is not set; web search questions will get no context");
    }
    let search = Arc::new(WebSearchFetcher::new(
        Arc::new(TavilyClient::new(
            config.search_api_key.clone().unwrap_or_default(),
        )),
        Arc::new(HttpPageFetcher::new()),
        config.search_domains.clone(),
        config.max_search_results,
    ));

    Ok(Workflow::new(
        Router::new(client.clone(), &config.model),
        Generator::new(client, &config.model),
        retriever,
        search,
    ))
}
