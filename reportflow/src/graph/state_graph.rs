//! State graph: nodes + explicit edges (from → to) and labelled conditional edges.
//!
//! Add nodes with `add_node`, define the flow with `add_edge(from, to)` using
//! `START` and `END` for graph entry/exit. Use `add_conditional_edges` to route
//! to the next node based on state. Then `compile` to get a `CompiledStateGraph`.
//!
//! # Conditional edges
//!
//! From a source node, a router `(state) -> label` is called; the label is looked
//! up in the path map. A node must have either one outgoing `add_edge` or
//! `add_conditional_edges`, not both.
//!
//! # State updates
//!
//! Nodes return the whole state; it replaces the previous one.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::{ConditionalRouter, EdgeLabel, NextEntry};
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// State graph: nodes plus explicit edges and optional conditional edges.
///
/// Generic over state type `S`. Build with `add_node` / `add_edge(from, to)` (use
/// `START` and `END` for entry/exit), and optionally `add_conditional_edges` for
/// state-based routing. Then `compile()` to obtain an executable graph.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
/// Middleware can be set via `with_middleware`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Registration order, kept for stable visualization output.
    node_order: Vec<String>,
    /// Edges (from_id, to_id).
    edges: Vec<(String, String)>,
    conditional_edges: Vec<(String, ConditionalRouter<S>)>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            node_order: Vec::new(),
            edges: Vec::new(),
            conditional_edges: Vec::new(),
            middleware: None,
        }
    }

    /// Attaches node middleware. `compile()` hands it to the compiled graph.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Adds a node; id must be unique. Replaces if same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        let id = id.into();
        if !self.nodes.contains_key(&id) {
            self.node_order.push(id.clone());
        }
        self.nodes.insert(id, node);
        self
    }

    /// Adds an edge from `from_id` to `to_id`.
    ///
    /// Use `START` for graph entry and `END` for graph exit. Both ids (except
    /// START/END) must be registered via `add_node` before `compile()`.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Adds conditional edges from `source`: after it runs, `router(state)` picks a
    /// label and `path_map` gives the node (or `END`) for that label.
    ///
    /// Every variant of `L` must appear in `path_map`, or `compile` fails with
    /// `UnmappedEdgeLabel`. Calling this again for the same source replaces the router.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "classify",
    ///     route_by_task,
    ///     [(TaskRoute::Report, "extract_entity"), (TaskRoute::Other, "final_answer")],
    /// );
    /// ```
    pub fn add_conditional_edges<L, F, T>(
        &mut self,
        source: impl Into<String>,
        router: F,
        path_map: impl IntoIterator<Item = (L, T)>,
    ) -> &mut Self
    where
        L: EdgeLabel,
        F: Fn(&S) -> L + Send + Sync + 'static,
        T: Into<String>,
    {
        let source = source.into();
        let router = ConditionalRouter::new(router, path_map);
        self.conditional_edges.retain(|(s, _)| s != &source);
        self.conditional_edges.push((source, router));
        self
    }

    /// Builds the executable graph using the middleware set by `with_middleware`, if any.
    ///
    /// Returns `CompilationError` if any edge references an unknown node or the
    /// topology cannot run from START to END. On success, the graph is immutable.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let middleware = self.middleware.clone();
        self.compile_internal(middleware)
    }

    /// Builds the executable graph with node middleware wrapping each node.run.
    pub fn compile_with_middleware(
        self,
        middleware: Arc<dyn NodeMiddleware<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(Some(middleware))
    }

    fn compile_internal(
        self,
        middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        for (source, router) in &self.conditional_edges {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            for (_, target) in router.targets() {
                if target != END && !self.nodes.contains_key(target) {
                    return Err(CompilationError::InvalidConditionalPathMap(
                        target.to_string(),
                    ));
                }
            }
            if let Some(label) = router.unmapped_labels().first() {
                return Err(CompilationError::UnmappedEdgeLabel {
                    node: source.clone(),
                    label: label.to_string(),
                });
            }
        }

        let mut start_edges = self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t.clone());
        let first = match (start_edges.next(), start_edges.next()) {
            (None, _) => return Err(CompilationError::MissingStart),
            (Some(first), None) => first,
            (Some(_), Some(_)) => {
                return Err(CompilationError::InvalidTopology(
                    "multiple edges from START".into(),
                ))
            }
        };
        if first == END {
            return Err(CompilationError::InvalidTopology(
                "START leads directly to END".into(),
            ));
        }

        let has_end = self.edges.iter().any(|(_, t)| t == END)
            || self
                .conditional_edges
                .iter()
                .any(|(_, r)| r.targets().iter().any(|(_, t)| *t == END));
        if !has_end {
            return Err(CompilationError::MissingEnd);
        }

        let mut edge_froms = HashSet::new();
        for (from, _) in self.edges.iter().filter(|(f, _)| f != START) {
            if !edge_froms.insert(from.clone()) {
                return Err(CompilationError::InvalidTopology(format!(
                    "multiple edges from {}",
                    from
                )));
            }
        }
        for (source, _) in &self.conditional_edges {
            if edge_froms.contains(source) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(
                    source.clone(),
                ));
            }
        }

        let mut next_map: HashMap<String, NextEntry<S>> = self
            .edges
            .iter()
            .filter(|(f, _)| f != START)
            .map(|(f, t)| (f.clone(), NextEntry::Unconditional(t.clone())))
            .collect();
        for (source, router) in &self.conditional_edges {
            next_map.insert(source.clone(), NextEntry::Conditional(router.clone()));
        }
        if let Some(orphan) = self
            .node_order
            .iter()
            .find(|id| !next_map.contains_key(id.as_str()))
        {
            return Err(CompilationError::MissingSuccessor(orphan.clone()));
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            node_order: self.node_order,
            first_node_id: first,
            next_map,
            middleware,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::graph::{EdgeLabel, Node};

    #[derive(Clone, Debug)]
    #[allow(dead_code)]
    struct DummyState(i32);

    #[derive(Clone)]
    struct DummyNode(&'static str);

    #[async_trait]
    impl Node<DummyState> for DummyNode {
        fn id(&self) -> &str {
            self.0
        }
        async fn run(
            &self,
            state: DummyState,
        ) -> Result<(DummyState, crate::graph::Next), crate::error::AgentError> {
            Ok((state, crate::graph::Next::Continue))
        }
    }

    #[derive(Clone, Copy, Debug)]
    enum Fork {
        Left,
        Right,
    }

    impl EdgeLabel for Fork {
        fn all() -> &'static [Self] {
            &[Fork::Left, Fork::Right]
        }
        fn as_str(&self) -> &'static str {
            match self {
                Fork::Left => "left",
                Fork::Right => "right",
            }
        }
    }

    fn graph_ab() -> StateGraph<DummyState> {
        let mut graph = StateGraph::<DummyState>::new();
        graph.add_node("a", Arc::new(DummyNode("a")));
        graph.add_node("b", Arc::new(DummyNode("b")));
        graph
    }

    /// **Scenario**: Compile fails when a node has both an outgoing edge and conditional edges.
    #[test]
    fn compile_fails_when_node_has_both_edge_and_conditional() {
        let mut graph = graph_ab();
        graph.add_edge(START, "a");
        graph.add_edge("a", "b");
        graph.add_edge("b", END);
        graph.add_conditional_edges("a", |_| Fork::Left, [(Fork::Left, "b"), (Fork::Right, "b")]);
        match graph.compile() {
            Err(CompilationError::NodeHasBothEdgeAndConditional(id)) => assert_eq!(id, "a"),
            Err(e) => panic!("expected NodeHasBothEdgeAndConditional(a), got {:?}", e),
            Ok(_) => panic!("expected compile error"),
        }
    }

    /// **Scenario**: Compile fails when conditional path_map references a non-existent node.
    #[test]
    fn compile_fails_when_conditional_path_map_has_invalid_target() {
        let mut graph = graph_ab();
        graph.add_edge(START, "a");
        graph.add_edge("b", END);
        graph.add_conditional_edges(
            "a",
            |_| Fork::Left,
            [(Fork::Left, "b"), (Fork::Right, "nonexistent")],
        );
        match graph.compile() {
            Err(CompilationError::InvalidConditionalPathMap(id)) => assert_eq!(id, "nonexistent"),
            Err(e) => panic!("expected InvalidConditionalPathMap, got {:?}", e),
            Ok(_) => panic!("expected compile error"),
        }
    }

    /// **Scenario**: Compile fails when a router label has no path_map entry.
    #[test]
    fn compile_fails_when_label_unmapped() {
        let mut graph = graph_ab();
        graph.add_edge(START, "a");
        graph.add_edge("b", END);
        graph.add_conditional_edges("a", |_| Fork::Left, [(Fork::Left, "b")]);
        match graph.compile() {
            Err(CompilationError::UnmappedEdgeLabel { node, label }) => {
                assert_eq!(node, "a");
                assert_eq!(label, "right");
            }
            Err(e) => panic!("expected UnmappedEdgeLabel, got {:?}", e),
            Ok(_) => panic!("expected compile error"),
        }
    }

    /// **Scenario**: Compile fails when a registered node has no way forward.
    #[test]
    fn compile_fails_when_node_has_no_successor() {
        let mut graph = graph_ab();
        graph.add_edge(START, "a");
        graph.add_edge("a", END);
        match graph.compile() {
            Err(CompilationError::MissingSuccessor(id)) => assert_eq!(id, "b"),
            Err(e) => panic!("expected MissingSuccessor(b), got {:?}", e),
            Ok(_) => panic!("expected compile error"),
        }
    }

    /// **Scenario**: Missing START edge, missing END and unknown nodes are rejected.
    #[test]
    fn compile_rejects_missing_start_end_and_unknown_nodes() {
        let mut graph = graph_ab();
        graph.add_edge("a", "b");
        graph.add_edge("b", END);
        assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));

        let mut graph = graph_ab();
        graph.add_edge(START, "a");
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");
        assert!(matches!(graph.compile(), Err(CompilationError::MissingEnd)));

        let mut graph = graph_ab();
        graph.add_edge(START, "a");
        graph.add_edge("a", "ghost");
        assert!(matches!(
            graph.compile(),
            Err(CompilationError::NodeNotFound(id)) if id == "ghost"
        ));
    }

    /// **Scenario**: Two edges from START or from one node are a branch and rejected.
    #[test]
    fn compile_rejects_branching_plain_edges() {
        let mut graph = graph_ab();
        graph.add_edge(START, "a");
        graph.add_edge(START, "b");
        graph.add_edge("a", END);
        graph.add_edge("b", END);
        assert!(matches!(
            graph.compile(),
            Err(CompilationError::InvalidTopology(_))
        ));

        let mut graph = graph_ab();
        graph.add_edge(START, "a");
        graph.add_edge("a", "b");
        graph.add_edge("a", END);
        graph.add_edge("b", END);
        assert!(matches!(
            graph.compile(),
            Err(CompilationError::InvalidTopology(_))
        ));
    }

    /// **Scenario**: A graph whose only route to END is a conditional edge compiles.
    #[test]
    fn compile_accepts_end_reached_through_conditional_edge() {
        let mut graph = graph_ab();
        graph.add_edge(START, "a");
        graph.add_edge("b", "a");
        graph.add_conditional_edges("a", |_| Fork::Right, [(Fork::Left, "b"), (Fork::Right, END)]);
        let compiled = graph.compile().expect("graph compiles");
        assert_eq!(compiled.node_ids(), vec!["a", "b"]);
    }
}
