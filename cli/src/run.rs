//! Builds the workflow from resolved settings and formats store health for `check`.

use std::fmt::Write as _;
use std::sync::Arc;

use reportflow::{
    AgentError, ChatOpenAI, ConfigError, FileChartRenderer, MockLlm, ReportWorkflow,
    SqliteDataStore, StoreError, StoreHealth, WorkflowBuildError,
};
use thiserror::Error;

use crate::settings::ResolvedConfig;

/// Rows shown by `check`.
const SAMPLE_ROWS: u32 = 5;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config: {0}")]
    Load(#[from] config::LoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Build(#[from] WorkflowBuildError),
    #[error(transparent)]
    Run(#[from] AgentError),
    #[error("data store: {0}")]
    Store(#[from] StoreError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Workflow backed by the OpenAI client, the SQLite file and the SVG renderer.
pub fn build_workflow(resolved: &ResolvedConfig) -> Result<ReportWorkflow, CliError> {
    let llm = ChatOpenAI::from_config(&resolved.workflow.llm)?;
    let workflow = ReportWorkflow::new(
        resolved.workflow.clone(),
        Arc::new(llm),
        Arc::new(SqliteDataStore::new(&resolved.database)),
        Arc::new(FileChartRenderer::new(&resolved.chart_dir)),
    )?;
    Ok(workflow)
}

/// Same topology without credentials; only used to print the graph, never run.
pub fn graph_only_workflow(resolved: &ResolvedConfig) -> Result<ReportWorkflow, CliError> {
    let workflow = ReportWorkflow::new(
        resolved.workflow.clone(),
        Arc::new(MockLlm::new("")),
        Arc::new(SqliteDataStore::new(&resolved.database)),
        Arc::new(FileChartRenderer::new(&resolved.chart_dir)),
    )?;
    Ok(workflow)
}

/// Validates the workflow settings and opens the configured table.
pub async fn check_store(resolved: &ResolvedConfig) -> Result<StoreHealth, CliError> {
    resolved.workflow.validate()?;
    let store = SqliteDataStore::new(&resolved.database);
    let health = store.check(&resolved.workflow.data.table, SAMPLE_ROWS).await?;
    Ok(health)
}

/// Human-readable summary of [`StoreHealth`].
pub fn render_health(resolved: &ResolvedConfig, health: &StoreHealth) -> Result<String, CliError> {
    let mut out = String::new();
    let _ = writeln!(out, "database: {}", resolved.database.display());
    let _ = writeln!(out, "tables: {}", health.tables.join(", "));
    let _ = writeln!(
        out,
        "table {}: {} rows",
        resolved.workflow.data.table, health.row_count
    );
    let _ = writeln!(out, "columns: {}", health.sample.columns().join(", "));
    for row in health.sample.rows() {
        let _ = writeln!(out, "  {}", serde_json::to_string(row)?);
    }
    let key = if resolved.workflow.llm.api_key.is_some() {
        "set"
    } else {
        "missing"
    };
    let _ = writeln!(out, "model: {} (api key {})", resolved.workflow.llm.model, key);
    Ok(out)
}

/// Truncates `s` to at most `max` chars, ending in `...` when cut. 0 means no limit.
pub fn truncate_message(s: &str, max: usize) -> String {
    const SUFFIX: &str = "...";
    if max == 0 || s.chars().count() <= max {
        return s.to_string();
    }
    if max <= SUFFIX.len() {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - SUFFIX.len()).collect();
    out.push_str(SUFFIX);
    out
}
