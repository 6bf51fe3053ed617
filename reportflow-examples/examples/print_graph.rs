//! Example: print the report workflow topology.
//!
//! Run: `cargo run -p reportflow-examples --example print_graph -- --dot | dot -Tsvg > graph.svg`

use std::sync::Arc;

use reportflow::{
    generate_dot, generate_text, FileChartRenderer, MockLlm, ReportWorkflow, SqliteDataStore,
    WorkflowConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let workflow = ReportWorkflow::new(
        WorkflowConfig::default(),
        Arc::new(MockLlm::new("")),
        Arc::new(SqliteDataStore::new("sales_data.db")),
        Arc::new(FileChartRenderer::new(".")),
    )?;
    if std::env::args().any(|a| a == "--dot") {
        print!("{}", generate_dot(workflow.graph()));
    } else {
        print!("{}", generate_text(workflow.graph()));
    }
    Ok(())
}
