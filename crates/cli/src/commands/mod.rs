//! Command handlers for the Grounded CLI.

mod ask;
mod ingest;
mod stats;

pub use ask::AskCommand;
pub use ingest::IngestCommand;
pub use stats::StatsCommand;
