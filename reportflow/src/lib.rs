//! # reportflow
//!
//! A state-graph workflow that turns a free-text request ("produce a sales performance
//! report for region X") into a written performance report.
//!
//! ## Design principles
//!
//! - **Single state type**: one [`ReportState`] record flows through every node; each node
//!   writes only the field it owns.
//! - **Explicit wiring**: the graph is a [`StateGraph`] with unconditional edges and
//!   conditional edges keyed by closed label enums ([`EdgeLabel`]); `compile` rejects
//!   unmapped labels and dangling nodes before anything runs.
//! - **Narrow collaborators**: the language model ([`LlmClient`]), the data store
//!   ([`DataStore`]) and the chart renderer ([`ChartRenderer`]) are traits behind `Arc`.
//! - **Explicit configuration**: [`WorkflowConfig`] is passed at construction; the library
//!   never reads the environment.
//!
//! ## Pipeline
//!
//! `classify` → (`extract_entity` → `build_query` → `fetch_data` → `analyze` → `render_chart`
//! → `draft_report` → `review_decision`) → `final_answer`. Non-report requests skip straight to
//! `final_answer` and are refused. Only a language-model failure fails a run: store errors
//! yield an empty table (and a review notice), renderer errors yield no chart.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`], middleware, visualization.
//! - [`nodes`]: the nine pipeline nodes and the two routers.
//! - [`workflow`]: [`ReportWorkflow`], [`WorkflowConfig`].
//! - [`state`]: [`ReportState`], [`ResultTable`], [`EntityFilter`], [`TaskKind`].
//! - [`analysis`]: [`analyze`] and its [`Analysis`] output.
//! - [`store`]: [`DataStore`], [`QuerySpec`], [`SqliteDataStore`].
//! - [`chart`]: [`ChartRenderer`], [`FileChartRenderer`].
//! - [`llm`]: [`LlmClient`], [`MockLlm`], [`ChatOpenAI`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use reportflow::{ChatOpenAI, FileChartRenderer, ReportWorkflow, SqliteDataStore, WorkflowConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = WorkflowConfig::default();
//! config.llm.api_key = Some("sk-...".into());
//! let llm = ChatOpenAI::from_config(&config.llm)?;
//! let workflow = ReportWorkflow::new(
//!     config,
//!     Arc::new(llm),
//!     Arc::new(SqliteDataStore::new("sales_data.db")),
//!     Arc::new(FileChartRenderer::new(".")),
//! )?;
//! println!("{}", workflow.run("서울 지역 실적 보고서").await?);
//! # Ok(())
//! # }
//! ```
//!
//! Run the offline demo: `cargo run -p reportflow-examples --example mock_report`.

pub mod analysis;
pub mod chart;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod nodes;
pub mod state;
pub mod store;
pub mod workflow;

pub use analysis::{analyze, Analysis, ColumnSummary, Metrics, TrendPoint};
pub use chart::{ChartError, ChartRef, ChartRenderer, FileChartRenderer};
pub use error::AgentError;
pub use graph::{
    generate_dot, generate_text, CompilationError, CompiledStateGraph, EdgeLabel,
    LoggingNodeMiddleware, Next, Node, NodeMiddleware, StateGraph, END, START,
};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm};
pub use message::Message;
pub use nodes::{ReviewRoute, TaskRoute};
pub use state::{EntityFilter, ReportState, ResultTable, TaskKind, Value, ALL_ENTITIES};
pub use store::{DataStore, QuerySpec, SqlQuery, SqliteDataStore, StoreError, StoreHealth};
pub use workflow::{
    build_report_graph, ConfigError, DataConfig, LlmConfig, ReportWorkflow, WorkflowBuildError,
    WorkflowConfig,
};
