//! The question-answering engine.
//!
//! Assembles the router, the two retrieval branches, and the generator into
//! a fixed workflow: route the question, gather context, generate an answer.

pub mod generator;
pub mod router;
pub mod source;
pub mod state;
pub mod workflow;

pub use generator::Generator;
pub use router::Router;
pub use source::DocumentSource;
pub use state::{RequestState, RouteDecision, WorkflowStep};
pub use workflow::{StateStream, Workflow, FALLBACK_ANSWER};
