//! Graph visualization: Graphviz DOT and a plain-text listing.

use std::fmt::Write;

use super::{CompiledStateGraph, NextEntry};
use super::{END, START};

/// Outgoing edges of `node_id` as `(label, target)`; unconditional edges have no label.
fn edges_from<'a, S>(graph: &'a CompiledStateGraph<S>, node_id: &str) -> Vec<(Option<&'static str>, &'a str)>
where
    S: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    match graph.next_map.get(node_id) {
        Some(NextEntry::Unconditional(to)) => vec![(None, to.as_str())],
        Some(NextEntry::Conditional(router)) => router
            .targets()
            .into_iter()
            .map(|(label, to)| (Some(label), to))
            .collect(),
        None => vec![],
    }
}

/// Generate Graphviz DOT format representation of the graph.
///
/// Conditional edges are dashed and labelled with their edge label.
pub fn generate_dot<S>(graph: &CompiledStateGraph<S>) -> String
where
    S: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    let mut dot = String::from("digraph {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box];\n\n");

    let _ = writeln!(
        dot,
        "  \"{}\" [label=\"START\", style=bold, fillcolor=lightgreen];",
        START
    );
    let _ = writeln!(
        dot,
        "  \"{}\" [label=\"END\", style=bold, fillcolor=lightcoral];",
        END
    );
    for node_id in &graph.node_order {
        let _ = writeln!(dot, "  \"{}\";", node_id);
    }
    dot.push('\n');

    let _ = writeln!(dot, "  \"{}\" -> \"{}\";", START, graph.first_node_id);
    for node_id in &graph.node_order {
        for (label, to) in edges_from(graph, node_id) {
            match label {
                Some(label) => {
                    let _ = writeln!(
                        dot,
                        "  \"{}\" -> \"{}\" [label=\"{}\", style=dashed];",
                        node_id, to, label
                    );
                }
                None => {
                    let _ = writeln!(dot, "  \"{}\" -> \"{}\";", node_id, to);
                }
            }
        }
    }

    dot.push_str("}\n");
    dot
}

/// Generate a simple text representation of the graph structure.
pub fn generate_text<S>(graph: &CompiledStateGraph<S>) -> String
where
    S: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    let mut text = String::new();
    let _ = writeln!(text, "Graph Structure:");
    let _ = writeln!(text, "Nodes: {}", graph.node_order.len());
    let _ = writeln!(text, "\nEdges:");
    let _ = writeln!(text, "  {} -> {}", START, graph.first_node_id);
    for node_id in &graph.node_order {
        for (label, to) in edges_from(graph, node_id) {
            match label {
                Some(label) => {
                    let _ = writeln!(text, "  {} -[{}]-> {}", node_id, label, to);
                }
                None => {
                    let _ = writeln!(text, "  {} -> {}", node_id, to);
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::error::AgentError;
    use crate::graph::{EdgeLabel, Next, Node, StateGraph};

    struct Pass(&'static str);

    #[async_trait]
    impl Node<String> for Pass {
        fn id(&self) -> &str {
            self.0
        }
        async fn run(&self, state: String) -> Result<(String, Next), AgentError> {
            Ok((state, Next::Continue))
        }
    }

    #[derive(Clone, Copy)]
    enum Gate {
        Open,
        Closed,
    }

    impl EdgeLabel for Gate {
        fn all() -> &'static [Self] {
            &[Gate::Open, Gate::Closed]
        }
        fn as_str(&self) -> &'static str {
            match self {
                Gate::Open => "open",
                Gate::Closed => "closed",
            }
        }
    }

    fn sample() -> CompiledStateGraph<String> {
        let mut graph = StateGraph::<String>::new();
        graph.add_node("node1", Arc::new(Pass("node1")));
        graph.add_node("node2", Arc::new(Pass("node2")));
        graph.add_edge(START, "node1");
        graph.add_conditional_edges(
            "node1",
            |_: &String| Gate::Open,
            [(Gate::Open, "node2"), (Gate::Closed, END)],
        );
        graph.add_edge("node2", END);
        graph.compile().unwrap()
    }

    #[test]
    fn test_generate_dot() {
        let dot = generate_dot(&sample());
        assert!(dot.contains("digraph"));
        assert!(dot.contains("START"));
        assert!(dot.contains("END"));
        assert!(dot.contains("\"__start__\" -> \"node1\";"));
        assert!(dot.contains("\"node1\" -> \"node2\" [label=\"open\", style=dashed];"));
        assert!(dot.contains("\"node1\" -> \"__end__\" [label=\"closed\", style=dashed];"));
        assert!(dot.contains("\"node2\" -> \"__end__\";"));
    }

    #[test]
    fn test_generate_text() {
        let text = generate_text(&sample());
        assert!(text.contains("Graph Structure"));
        assert!(text.contains("Nodes: 2"));
        assert!(text.contains("node1 -[open]-> node2"));
        assert!(text.contains(&format!("node1 -[closed]-> {}", END)));
        assert!(text.contains(&format!("node2 -> {}", END)));
    }
}
