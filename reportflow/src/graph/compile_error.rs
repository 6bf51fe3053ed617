//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the topology is not runnable.

use thiserror::Error;

/// Error when compiling a state graph.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// A node id in an edge was not registered via `add_node` (and is not START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge has from_id == START.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// Nothing leads to END.
    #[error("graph must have at least one edge to END")]
    MissingEnd,

    /// Edges branch where they must not (several START edges, several edges from one node).
    #[error("invalid graph topology: {0}")]
    InvalidTopology(String),

    /// A node has both an outgoing edge and conditional edges; it must have exactly one.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A value in a conditional path_map is not a valid node id or END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),

    /// A label the router can return has no entry in the path map.
    #[error("conditional edges from {node} do not map label {label}")]
    UnmappedEdgeLabel { node: String, label: String },

    /// A registered node has neither an outgoing edge nor conditional edges.
    #[error("node has no outgoing edge: {0}")]
    MissingSuccessor(String),
}
