//! Workflow state and the typed stages a request moves through.
//!
//! A request advances Route -> Retrieve/WebSearch -> Generate. Each stage
//! has its own type, so an answer cannot exist before documents do and a
//! retrieval cannot happen before a routing decision. [`RequestState`] is
//! the observable snapshot derived from whichever stage a request is in.

use grounded_core::DocumentChunk;
use serde::{Deserialize, Serialize};

/// The step that most recently completed for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Start,
    Route,
    Retrieve,
    WebSearch,
    Generate,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::Start => "start",
            WorkflowStep::Route => "route",
            WorkflowStep::Retrieve => "retrieve",
            WorkflowStep::WebSearch => "web_search",
            WorkflowStep::Generate => "generate",
        }
    }
}

/// Which retrieval branch a question was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    Vectorstore,
    WebSearch,
}

impl RouteDecision {
    /// Interpret a raw classifier response.
    ///
    /// Anything that does not clearly name the web search branch falls back
    /// to the vector store, so a confused or verbose response still routes
    /// somewhere useful.
    pub fn from_response(response: &str) -> Self {
        if response.to_lowercase().contains("web_search") {
            RouteDecision::WebSearch
        } else {
            RouteDecision::Vectorstore
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteDecision::Vectorstore => "vectorstore",
            RouteDecision::WebSearch => "web_search",
        }
    }

    /// The step that executes this decision.
    pub fn step(&self) -> WorkflowStep {
        match self {
            RouteDecision::Vectorstore => WorkflowStep::Retrieve,
            RouteDecision::WebSearch => WorkflowStep::WebSearch,
        }
    }
}

/// Observable snapshot of a request at a point in the workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestState {
    /// The question being answered
    pub question: String,

    /// Documents gathered by the retrieval branch, if it has run
    pub documents: Vec<DocumentChunk>,

    /// The final answer, present only after generation
    pub answer: Option<String>,

    /// The step that produced this snapshot
    pub last_step: WorkflowStep,
}

impl RequestState {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            documents: Vec::new(),
            answer: None,
            last_step: WorkflowStep::Start,
        }
    }
}

/// A request that has been routed but not yet retrieved for.
#[derive(Debug, Clone)]
pub struct Routed {
    pub question: String,
    pub decision: RouteDecision,
}

impl Routed {
    /// Attach the documents the chosen branch produced.
    pub fn with_documents(self, documents: Vec<DocumentChunk>) -> Retrieved {
        Retrieved {
            question: self.question,
            decision: self.decision,
            documents,
        }
    }

    pub fn snapshot(&self) -> RequestState {
        RequestState {
            question: self.question.clone(),
            documents: Vec::new(),
            answer: None,
            last_step: WorkflowStep::Route,
        }
    }
}

/// A request with its retrieval context gathered, awaiting generation.
#[derive(Debug, Clone)]
pub struct Retrieved {
    pub question: String,
    pub decision: RouteDecision,
    pub documents: Vec<DocumentChunk>,
}

impl Retrieved {
    /// Attach the generated answer, completing the request.
    pub fn with_answer(self, answer: impl Into<String>) -> Generated {
        Generated {
            question: self.question,
            documents: self.documents,
            answer: answer.into(),
        }
    }

    pub fn snapshot(&self) -> RequestState {
        RequestState {
            question: self.question.clone(),
            documents: self.documents.clone(),
            answer: None,
            last_step: self.decision.step(),
        }
    }
}

/// A completed request.
#[derive(Debug, Clone)]
pub struct Generated {
    pub question: String,
    pub documents: Vec<DocumentChunk>,
    pub answer: String,
}

impl Generated {
    pub fn snapshot(&self) -> RequestState {
        RequestState {
            question: self.question.clone(),
            documents: self.documents.clone(),
            answer: Some(self.answer.clone()),
            last_step: WorkflowStep::Generate,
        }
    }
}

impl From<Generated> for RequestState {
    fn from(generated: Generated) -> Self {
        generated.snapshot()
    }
}
