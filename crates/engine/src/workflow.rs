//! The question-answering workflow.
//!
//! One fixed sequence of steps: route the question, gather context from the
//! chosen branch, generate an answer. Every step degrades rather than
//! aborts, so a request always completes with an answer.

use crate::generator::Generator;
use crate::router::Router;
use crate::source::DocumentSource;
use crate::state::{RequestState, RouteDecision, Routed};
use futures::channel::mpsc;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;

/// Answer substituted when generation fails.
pub const FALLBACK_ANSWER: &str = "Sorry, I encountered an error.";

/// Stream of state snapshots emitted as a request advances.
pub type StateStream = Pin<Box<dyn Stream<Item = RequestState> + Send>>;

/// The assembled workflow. Build once, share via `Arc`, run many times.
pub struct Workflow {
    router: Router,
    generator: Generator,
    vectorstore: Arc<dyn DocumentSource>,
    web_search: Arc<dyn DocumentSource>,
}

impl Workflow {
    pub fn new(
        router: Router,
        generator: Generator,
        vectorstore: Arc<dyn DocumentSource>,
        web_search: Arc<dyn DocumentSource>,
    ) -> Self {
        Self {
            router,
            generator,
            vectorstore,
            web_search,
        }
    }

    /// Run the workflow to completion and return the final state.
    ///
    /// The returned state always has `answer` set; failures along the way
    /// degrade (default route, empty context, fallback answer) instead of
    /// propagating.
    pub async fn run(&self, question: &str) -> RequestState {
        self.execute(question, |_| {}).await
    }

    /// Run the workflow, emitting a state snapshot after each step.
    ///
    /// Yields exactly three snapshots: after routing, after the retrieval
    /// branch, and after generation. The last snapshot is the final state.
    pub fn stream(self: Arc<Self>, question: &str) -> StateStream {
        let (tx, rx) = mpsc::unbounded();
        let workflow = self;
        let question = question.to_string();

        tokio::spawn(async move {
            workflow
                .execute(&question, |snapshot| {
                    let _ = tx.unbounded_send(snapshot);
                })
                .await;
        });

        Box::pin(rx)
    }

    async fn execute<F>(&self, question: &str, mut emit: F) -> RequestState
    where
        F: FnMut(RequestState),
    {
        let decision = match self.router.route(question).await {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!("Routing failed, defaulting to vectorstore: {}", e);
                RouteDecision::Vectorstore
            }
        };
        let routed = Routed {
            question: question.to_string(),
            decision,
        };
        emit(routed.snapshot());

        let source = match decision {
            RouteDecision::Vectorstore => &self.vectorstore,
            RouteDecision::WebSearch => &self.web_search,
        };
        let documents = match source.gather(question).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!(
                    source = source.source_name(),
                    "Context gathering failed, continuing with no documents: {}",
                    e
                );
                Vec::new()
            }
        };
        let retrieved = routed.with_documents(documents);
        emit(retrieved.snapshot());

        let answer = match self
            .generator
            .generate(&retrieved.question, &retrieved.documents)
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("Generation failed, returning fallback answer: {}", e);
                FALLBACK_ANSWER.to_string()
            }
        };
        let generated = retrieved.with_answer(answer);
        let final_state = generated.snapshot();
        emit(final_state.clone());
        final_state
    }
}
