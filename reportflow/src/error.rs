//! Run-level error type.
//!
//! Only failures that must abort a run surface here. Data-store and chart-renderer
//! failures are absorbed by their nodes and never become an `AgentError`.

use thiserror::Error;

/// Error that terminates a graph run.
///
/// Returned by `Node::run`, `CompiledStateGraph::invoke` and `ReportWorkflow::run`.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. graph misuse, missing final answer).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The language-model service could not produce a completion.
    #[error("language model call failed: {0}")]
    Llm(String),
}
