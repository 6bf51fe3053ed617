//! State graph: named nodes over one state record, unconditional and labelled
//! conditional edges, compile-time validation and a sequential executor.
//!
//! Build a [`StateGraph`], `compile` it into a [`CompiledStateGraph`], then
//! `invoke` it with an initial state.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod logging_middleware;
mod next;
mod node;
mod node_middleware;
mod state_graph;
mod visualization;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, EdgeLabel, NextEntry};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_route,
};
pub use logging_middleware::LoggingNodeMiddleware;
pub use next::Next;
pub use node::Node;
pub use node_middleware::{NodeMiddleware, NodeRunFn};
pub use state_graph::{StateGraph, END, START};
pub use visualization::{generate_dot, generate_text};
