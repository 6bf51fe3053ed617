//! Structured `tracing` events for graph execution.

use std::fmt::Debug;

pub fn log_node_start<S: Debug>(node_id: &str, state: &S) {
    tracing::debug!(node_id = node_id, "Starting node execution");
    tracing::trace!(node_id = node_id, state = ?state, "Node input state");
}

pub fn log_node_complete(node_id: &str, next: &crate::graph::Next) {
    tracing::debug!(node_id = node_id, ?next, "Node execution complete");
}

/// Log a conditional routing decision: the label the router chose and where it leads.
pub fn log_route(from: &str, label: &str, to: &str) {
    tracing::debug!(from = from, label = label, to = to, "conditional routing");
}

pub fn log_graph_start(entry: &str) {
    tracing::info!(entry = entry, "Starting graph execution");
}

pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps, "Graph execution complete");
}

pub fn log_graph_error(node_id: &str, error: &crate::error::AgentError) {
    tracing::error!(node_id = node_id, %error, "Graph execution error");
}
