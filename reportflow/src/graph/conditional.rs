//! Conditional edges: route to the next node based on state.
//!
//! A source node has a router that takes the current state and returns an edge
//! label; the label is looked up in the path map to find the next node id.
//! Labels come from a closed [`EdgeLabel`] enum so `compile` can check that the
//! map covers all of them.
//!
//! **Interaction**: Used by `StateGraph::add_conditional_edges` and the
//! `CompiledStateGraph` run loop.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// A closed set of routing labels.
///
/// Implemented by small `Copy` enums; `all` lists every variant so a graph can
/// be validated against its path map before it runs.
pub trait EdgeLabel: Copy + Send + Sync + 'static {
    fn all() -> &'static [Self];

    /// Stable name used in the path map, in logs and in graph output.
    fn as_str(&self) -> &'static str;
}

/// Type-erased router: state in, label name out.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> &'static str + Send + Sync>;

/// Conditional edge definition: routing function, its declared labels and the path map.
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    pub(super) path: ConditionalRouterFn<S>,
    /// Every label the router can return, in declaration order.
    pub(super) labels: Vec<&'static str>,
    /// Label -> node id (or END).
    pub(super) path_map: HashMap<String, String>,
}

impl<S> ConditionalRouter<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Builds a router from a typed routing function and `(label, target)` pairs.
    pub fn new<L, F, T>(path: F, path_map: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: EdgeLabel,
        F: Fn(&S) -> L + Send + Sync + 'static,
        T: Into<String>,
    {
        Self {
            path: Arc::new(move |s: &S| path(s).as_str()),
            labels: L::all().iter().map(|l| l.as_str()).collect(),
            path_map: path_map
                .into_iter()
                .map(|(l, t)| (l.as_str().to_string(), t.into()))
                .collect(),
        }
    }

    /// Labels declared by the router's label enum that have no path-map entry.
    pub fn unmapped_labels(&self) -> Vec<&'static str> {
        self.labels
            .iter()
            .copied()
            .filter(|l| !self.path_map.contains_key(*l))
            .collect()
    }

    /// `(label, target)` pairs in label declaration order; unmapped labels are skipped.
    pub fn targets(&self) -> Vec<(&'static str, &str)> {
        self.labels
            .iter()
            .filter_map(|l| self.path_map.get(*l).map(|t| (*l, t.as_str())))
            .collect()
    }

    /// Runs the router and returns `(label, next node id)`.
    ///
    /// `None` for the target when the label is missing from the path map; a
    /// compiled graph never produces that.
    pub fn resolve_next(&self, state: &S) -> (&'static str, Option<&str>) {
        let label = (self.path)(state);
        (label, self.path_map.get(label).map(String::as_str))
    }
}

/// How to determine the next node after a given node runs.
#[derive(Clone)]
pub enum NextEntry<S> {
    /// Single fixed next node (or END). Node's `Next` (Continue/Node/End) is still respected.
    Unconditional(String),
    /// Next node is decided by the router from state; the node's `Next` is ignored.
    Conditional(ConditionalRouter<S>),
}
