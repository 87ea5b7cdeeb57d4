//! Grounded Core Library
//!
//! Foundational utilities shared across the workspace:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - Shared data types (`DocumentChunk`)

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{DocumentChunk, SOURCE_KEY};
