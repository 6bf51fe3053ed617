//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds the nodes, the entry node and the
//! per-node successor map derived from the edges at compile time.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_route,
};
use super::node_middleware::{NodeMiddleware, NodeRunFn};
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Compiled graph: immutable structure, supports invoke only.
///
/// Runs from the START node; after each node uses the conditional router (when
/// present) or the node's returned `Next` to choose the next node. Shareable
/// across tasks; each `invoke` owns its own state.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) node_order: Vec<String>,
    pub(super) first_node_id: String,
    /// Node id -> Unconditional(to_id) or Conditional(router). Every node has an entry.
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node ids in registration order.
    pub fn node_ids(&self) -> Vec<&str> {
        self.node_order.iter().map(String::as_str).collect()
    }

    /// The node the run starts at (target of the START edge).
    pub fn entry(&self) -> &str {
        &self.first_node_id
    }

    async fn run_node(&self, node: Arc<dyn Node<S>>, state: S) -> Result<(S, Next), AgentError> {
        match &self.middleware {
            Some(mw) => {
                let id = node.id().to_string();
                let inner: NodeRunFn<S> =
                    Box::new(move |s| Box::pin(async move { node.run(s).await }));
                mw.around_run(&id, state, inner).await
            }
            None => node.run(state).await,
        }
    }

    /// Decides where to go after `current_id` returned `next`. `None` means stop.
    fn successor(&self, current_id: &str, state: &S, next: Next) -> Result<Option<String>, AgentError> {
        let target = match self.next_map.get(current_id) {
            Some(NextEntry::Conditional(router)) => {
                let (label, target) = router.resolve_next(state);
                let target = target.ok_or_else(|| {
                    AgentError::ExecutionFailed(format!(
                        "router for {} returned unmapped label {}",
                        current_id, label
                    ))
                })?;
                log_route(current_id, label, target);
                target.to_string()
            }
            Some(NextEntry::Unconditional(to)) => match next {
                Next::End => return Ok(None),
                Next::Node(id) => id,
                Next::Continue => to.clone(),
            },
            None => {
                return Err(AgentError::ExecutionFailed(format!(
                    "no successor for node {}",
                    current_id
                )))
            }
        };
        if target == END {
            return Ok(None);
        }
        if !self.nodes.contains_key(&target) {
            return Err(AgentError::ExecutionFailed(format!(
                "node {} routed to unknown node {}",
                current_id, target
            )));
        }
        Ok(Some(target))
    }

    /// Runs the graph with the given state until END and returns the final state.
    ///
    /// - `Next::Continue`: follow the node's edge.
    /// - `Next::Node(id)`: run the node with that id next.
    /// - `Next::End`: stop and return current state.
    ///
    /// The first node error halts the run and is returned as-is.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        if !self.nodes.contains_key(&self.first_node_id) {
            return Err(AgentError::ExecutionFailed("empty graph".into()));
        }
        let mut state = state;
        let mut current_id = self.first_node_id.clone();
        let mut steps = 0usize;
        log_graph_start(&current_id);

        loop {
            let node = match self.nodes.get(&current_id) {
                Some(node) => node.clone(),
                None => {
                    let e = AgentError::ExecutionFailed(format!("unknown node {}", current_id));
                    log_graph_error(&current_id, &e);
                    return Err(e);
                }
            };
            log_node_start(&current_id, &state);

            let (new_state, next) = match self.run_node(node, state).await {
                Ok(output) => output,
                Err(e) => {
                    log_graph_error(&current_id, &e);
                    return Err(e);
                }
            };
            steps += 1;
            log_node_complete(&current_id, &next);
            state = new_state;

            match self.successor(&current_id, &state, next) {
                Ok(Some(id)) => current_id = id,
                Ok(None) => {
                    log_graph_complete(steps);
                    return Ok(state);
                }
                Err(e) => {
                    log_graph_error(&current_id, &e);
                    return Err(e);
                }
            }
        }
    }
}
