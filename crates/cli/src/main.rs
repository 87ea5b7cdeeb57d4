//! Grounded CLI
//!
//! Main entry point for the grounded command-line tool.
//! Answers questions from a local knowledge base or the web.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, IngestCommand, StatsCommand};
use grounded_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Grounded CLI - question answering over local documents and the web
#[derive(Parser, Debug)]
#[command(name = "grounded")]
#[command(about = "Question answering over local documents and the web", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "GROUNDED_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "GROUNDED_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (groq, ollama)
    #[arg(short, long, global = true, env = "GROUNDED_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "GROUNDED_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question
    Ask(AskCommand),

    /// Index the knowledge directory into the local store
    Ingest(IngestCommand),

    /// Show index statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Secrets may live in a local .env file
    dotenvy::dotenv().ok();

    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Grounded CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    // Ensure .grounded directory exists
    config.ensure_state_dir()?;

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Ingest(_) => "ingest",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Ingest(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
