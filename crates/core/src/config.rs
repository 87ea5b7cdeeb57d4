//! Configuration management for Grounded.
//!
//! Configuration is merged from three sources, in increasing precedence:
//! - built-in defaults
//! - a YAML config file (`.grounded/config.yaml` in the workspace)
//! - environment variables and command-line flags
//!
//! The resulting [`AppConfig`] is read-only after startup; no part of the
//! core mutates it at runtime.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains `.grounded/`)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider for routing and generation (e.g., "groq", "ollama")
    pub provider: String,

    /// Model identifier for routing and generation
    pub model: String,

    /// API key for the LLM provider
    pub api_key: Option<String>,

    /// Embedding provider (e.g., "ollama", "hash")
    pub embedding_provider: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Directory holding source documents for ingestion
    pub knowledge_dir: PathBuf,

    /// Chunk size in characters
    pub chunk_size: usize,

    /// Overlap between adjacent chunks in characters (strictly less than
    /// `chunk_size`)
    pub chunk_overlap: usize,

    /// Number of chunks retrieved per question
    pub top_k: usize,

    /// Domain allowlist for web search
    pub search_domains: Vec<String>,

    /// Maximum number of web search results per question
    pub max_search_results: usize,

    /// API key for the web search provider
    pub search_api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "groq".to_string(),
            model: "openai/gpt-oss-20b".to_string(),
            api_key: None,
            embedding_provider: "ollama".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            knowledge_dir: PathBuf::from("knowledge_base"),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 1,
            search_domains: vec!["google.com".to_string()],
            max_search_results: 2,
            search_api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    models: Option<ModelsConfig>,
    ingestion: Option<IngestionConfig>,
    retrieval: Option<RetrievalConfig>,
    search: Option<SearchConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ModelsConfig {
    provider: Option<String>,
    model: Option<String>,
    #[serde(rename = "embeddingProvider")]
    embedding_provider: Option<String>,
    #[serde(rename = "embeddingModel")]
    embedding_model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IngestionConfig {
    #[serde(rename = "knowledgeDir")]
    knowledge_dir: Option<PathBuf>,
    #[serde(rename = "chunkSize")]
    chunk_size: Option<usize>,
    #[serde(rename = "chunkOverlap")]
    chunk_overlap: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RetrievalConfig {
    #[serde(rename = "topK")]
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SearchConfig {
    domains: Option<Vec<String>>,
    #[serde(rename = "maxResults")]
    max_results: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl AppConfig {
    /// Load configuration from environment variables, defaults, and the
    /// workspace config file.
    ///
    /// Environment variables:
    /// - `GROUNDED_WORKSPACE`: Override workspace path
    /// - `GROUNDED_CONFIG`: Path to config file
    /// - `GROUNDED_PROVIDER`: LLM provider
    /// - `GROUNDED_MODEL`: Model identifier
    /// - `GROUNDED_API_KEY`: API key for the LLM provider
    /// - `GROUNDED_EMBEDDING_PROVIDER`: Embedding provider
    /// - `GROUNDED_EMBEDDING_MODEL`: Embedding model identifier
    /// - `TAVILY_API_KEY`: Web search provider key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("GROUNDED_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("GROUNDED_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.workspace.join(".grounded/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override the YAML config
        if let Ok(provider) = std::env::var("GROUNDED_PROVIDER") {
            config.provider = provider;
        }
        if let Ok(model) = std::env::var("GROUNDED_MODEL") {
            config.model = model;
        }
        if let Ok(provider) = std::env::var("GROUNDED_EMBEDDING_PROVIDER") {
            config.embedding_provider = provider;
        }
        if let Ok(model) = std::env::var("GROUNDED_EMBEDDING_MODEL") {
            config.embedding_model = model;
        }

        config.api_key = std::env::var("GROUNDED_API_KEY").ok();
        config.search_api_key = std::env::var("TAVILY_API_KEY").ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        config.validate()?;
        Ok(config)
    }

    /// Merge values from a YAML config file into this configuration.
    fn merge_yaml(mut self, path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: ConfigFile = serde_yaml::from_str(&raw)
            .map_err(|e| AppError::Config(format!("Invalid config file {:?}: {}", path, e)))?;

        if let Some(models) = file.models {
            if let Some(provider) = models.provider {
                self.provider = provider;
            }
            if let Some(model) = models.model {
                self.model = model;
            }
            if let Some(provider) = models.embedding_provider {
                self.embedding_provider = provider;
            }
            if let Some(model) = models.embedding_model {
                self.embedding_model = model;
            }
        }

        if let Some(ingestion) = file.ingestion {
            if let Some(dir) = ingestion.knowledge_dir {
                self.knowledge_dir = dir;
            }
            if let Some(size) = ingestion.chunk_size {
                self.chunk_size = size;
            }
            if let Some(overlap) = ingestion.chunk_overlap {
                self.chunk_overlap = overlap;
            }
        }

        if let Some(retrieval) = file.retrieval {
            if let Some(top_k) = retrieval.top_k {
                self.top_k = top_k;
            }
        }

        if let Some(search) = file.search {
            if let Some(domains) = search.domains {
                self.search_domains = domains;
            }
            if let Some(max_results) = search.max_results {
                self.max_search_results = max_results;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        Ok(self)
    }

    /// Apply command-line flag overrides.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }
        if let Some(provider) = provider {
            self.provider = provider;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }
        if verbose {
            self.verbose = true;
            self.log_level = Some("debug".to_string());
        }
        if no_color {
            self.no_color = true;
        }
        self
    }

    /// Validate invariants that later stages rely on.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::Config("chunkSize must be positive".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::Config(format!(
                "chunkOverlap ({}) must be strictly less than chunkSize ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(AppError::Config("topK must be positive".to_string()));
        }
        Ok(())
    }

    /// Path to the persistent vector store.
    pub fn index_path(&self) -> PathBuf {
        self.workspace.join(".grounded/index.db")
    }

    /// Path to the source document directory, resolved against the
    /// workspace when relative.
    pub fn knowledge_path(&self) -> PathBuf {
        if self.knowledge_dir.is_absolute() {
            self.knowledge_dir.clone()
        } else {
            self.workspace.join(&self.knowledge_dir)
        }
    }

    /// Ensure the `.grounded/` state directory exists.
    pub fn ensure_state_dir(&self) -> AppResult<()> {
        let dir = self.workspace.join(".grounded");
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
            tracing::debug!("Created state directory {:?}", dir);
        }
        Ok(())
    }
}
