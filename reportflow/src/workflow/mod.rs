//! The report workflow: nine nodes wired into a compiled state graph.
//!
//! ```text
//! START -> classify -[performance_report]-> extract_entity -> build_query -> fetch_data
//!                   -[other]--------------------------------------------+
//!       -> analyze -> render_chart -> draft_report -> review_decision   |
//!       -[needs_review | auto]-> final_answer <-------------------------+
//!       final_answer -> END
//! ```

mod config;

pub use config::{
    default_match_columns, ConfigError, DataConfig, LlmConfig, WorkflowConfig, DEFAULT_MODEL,
    DEFAULT_REPORT_LANGUAGE, DEFAULT_TABLE, DEFAULT_TEMPERATURE,
};

use std::sync::Arc;

use thiserror::Error;

use crate::chart::ChartRenderer;
use crate::error::AgentError;
use crate::graph::{
    CompilationError, CompiledStateGraph, LoggingNodeMiddleware, StateGraph, END, START,
};
use crate::llm::LlmClient;
use crate::nodes::{
    self, route_by_review, route_by_task, AnalyzeNode, BuildQueryNode, ClassifyNode,
    DraftReportNode, ExtractEntityNode, FetchDataNode, FinalAnswerNode, RenderChartNode,
    ReviewDecisionNode, ReviewRoute, TaskRoute,
};
use crate::state::ReportState;
use crate::store::DataStore;

/// Failure to assemble a workflow.
#[derive(Debug, Error)]
pub enum WorkflowBuildError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("graph compilation failed: {0}")]
    Compile(#[from] CompilationError),
}

/// Builds the uncompiled report graph around the given collaborators.
pub fn build_report_graph(
    config: &WorkflowConfig,
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn DataStore>,
    charts: Arc<dyn ChartRenderer>,
) -> StateGraph<ReportState> {
    let mut graph = StateGraph::<ReportState>::new();
    graph
        .add_node(nodes::CLASSIFY, Arc::new(ClassifyNode::new(llm.clone())))
        .add_node(
            nodes::EXTRACT_ENTITY,
            Arc::new(ExtractEntityNode::new(llm.clone())),
        )
        .add_node(
            nodes::BUILD_QUERY,
            Arc::new(BuildQueryNode::new(config.data.clone())),
        )
        .add_node(nodes::FETCH_DATA, Arc::new(FetchDataNode::new(store)))
        .add_node(nodes::ANALYZE, Arc::new(AnalyzeNode))
        .add_node(nodes::RENDER_CHART, Arc::new(RenderChartNode::new(charts)))
        .add_node(
            nodes::DRAFT_REPORT,
            Arc::new(DraftReportNode::new(llm, config.report_language.clone())),
        )
        .add_node(nodes::REVIEW_DECISION, Arc::new(ReviewDecisionNode))
        .add_node(nodes::FINAL_ANSWER, Arc::new(FinalAnswerNode));

    graph
        .add_edge(START, nodes::CLASSIFY)
        .add_conditional_edges(
            nodes::CLASSIFY,
            route_by_task,
            [
                (TaskRoute::PerformanceReport, nodes::EXTRACT_ENTITY),
                (TaskRoute::Other, nodes::FINAL_ANSWER),
            ],
        )
        .add_edge(nodes::EXTRACT_ENTITY, nodes::BUILD_QUERY)
        .add_edge(nodes::BUILD_QUERY, nodes::FETCH_DATA)
        .add_edge(nodes::FETCH_DATA, nodes::ANALYZE)
        .add_edge(nodes::ANALYZE, nodes::RENDER_CHART)
        .add_edge(nodes::RENDER_CHART, nodes::DRAFT_REPORT)
        .add_edge(nodes::DRAFT_REPORT, nodes::REVIEW_DECISION)
        .add_conditional_edges(
            nodes::REVIEW_DECISION,
            route_by_review,
            [
                (ReviewRoute::NeedsReview, nodes::FINAL_ANSWER),
                (ReviewRoute::Auto, nodes::FINAL_ANSWER),
            ],
        )
        .add_edge(nodes::FINAL_ANSWER, END);
    graph
}

/// Compiled report workflow. Cheap to share; every run gets its own state.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use reportflow::{FileChartRenderer, MockLlm, ReportWorkflow, SqliteDataStore, WorkflowConfig};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let workflow = ReportWorkflow::new(
///     WorkflowConfig::default(),
///     Arc::new(MockLlm::new("PerformanceReport")),
///     Arc::new(SqliteDataStore::new("sales_data.db")),
///     Arc::new(FileChartRenderer::new("charts")),
/// )?;
/// let answer = workflow.run("전체 매출 현황 보고서를 만들어주세요").await?;
/// println!("{}", answer);
/// # Ok(())
/// # }
/// ```
pub struct ReportWorkflow {
    graph: CompiledStateGraph<ReportState>,
    config: WorkflowConfig,
}

impl ReportWorkflow {
    /// Validates `config` and compiles the graph with node enter/exit logging.
    pub fn new(
        config: WorkflowConfig,
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn DataStore>,
        charts: Arc<dyn ChartRenderer>,
    ) -> Result<Self, WorkflowBuildError> {
        config.validate()?;
        let graph = build_report_graph(&config, llm, store, charts)
            .with_middleware(Arc::new(LoggingNodeMiddleware::<ReportState>::default()))
            .compile()?;
        Ok(Self { graph, config })
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn graph(&self) -> &CompiledStateGraph<ReportState> {
        &self.graph
    }

    /// Runs one request and returns the whole final state.
    pub async fn run_state(&self, request_text: &str) -> Result<ReportState, AgentError> {
        tracing::info!(request = request_text, "report run started");
        self.graph.invoke(ReportState::new(request_text)).await
    }

    /// Runs one request and returns the final answer.
    ///
    /// Fails only when a language-model call fails (or the graph is misused);
    /// data and chart problems show up in the answer instead.
    pub async fn run(&self, request_text: &str) -> Result<String, AgentError> {
        let state = self.run_state(request_text).await?;
        state
            .final_answer
            .ok_or_else(|| AgentError::ExecutionFailed("run ended without a final answer".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate_text;
    use crate::llm::MockLlm;
    use crate::store::SqliteDataStore;
    use crate::FileChartRenderer;

    fn workflow(config: WorkflowConfig) -> Result<ReportWorkflow, WorkflowBuildError> {
        ReportWorkflow::new(
            config,
            Arc::new(MockLlm::new("Other")),
            Arc::new(SqliteDataStore::new("unused.db")),
            Arc::new(FileChartRenderer::new("unused")),
        )
    }

    #[test]
    fn graph_has_nine_nodes_starting_at_classify() {
        let wf = workflow(WorkflowConfig::default()).unwrap();
        assert_eq!(wf.graph().entry(), nodes::CLASSIFY);
        assert_eq!(
            wf.graph().node_ids(),
            vec![
                "classify",
                "extract_entity",
                "build_query",
                "fetch_data",
                "analyze",
                "render_chart",
                "draft_report",
                "review_decision",
                "final_answer",
            ]
        );
        let text = generate_text(wf.graph());
        assert!(text.contains("classify -[other]-> final_answer"));
        assert!(text.contains("review_decision -[needs_review]-> final_answer"));
        assert!(text.contains("review_decision -[auto]-> final_answer"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = WorkflowConfig::default();
        config.data.table = String::new();
        assert!(matches!(
            workflow(config),
            Err(WorkflowBuildError::Config(ConfigError::EmptyTable))
        ));
    }

    /// **Scenario**: A non-report request never touches the store (the db file does not exist).
    #[tokio::test]
    async fn other_request_is_refused() {
        let wf = workflow(WorkflowConfig::default()).unwrap();
        let answer = wf.run("오늘 날씨 어때?").await.unwrap();
        assert_eq!(answer, nodes::REFUSAL_MESSAGE);
    }
}
