//! Report drafting node: the model writes the report from the analysis.

use std::sync::Arc;

use async_trait::async_trait;

use crate::analysis::Analysis;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::state::{EntityFilter, ReportState};

use super::prompts::draft_report_instruction;

/// Writes `report_text`, the model reply verbatim.
///
/// The whole request goes in the system instruction; no user message is sent.
pub struct DraftReportNode {
    llm: Arc<dyn LlmClient>,
    language: String,
}

impl DraftReportNode {
    pub fn new(llm: Arc<dyn LlmClient>, language: impl Into<String>) -> Self {
        Self {
            llm,
            language: language.into(),
        }
    }
}

#[async_trait]
impl Node<ReportState> for DraftReportNode {
    fn id(&self) -> &str {
        super::DRAFT_REPORT
    }

    async fn run(&self, mut state: ReportState) -> Result<(ReportState, Next), AgentError> {
        let entity = state.entity_filter.clone().unwrap_or(EntityFilter::All);
        let analysis = state.analysis.clone().unwrap_or_else(Analysis::no_data);
        let instruction = draft_report_instruction(&entity, &analysis, &self.language)
            .map_err(|e| AgentError::ExecutionFailed(format!("serialize analysis: {}", e)))?;
        let report = self.llm.complete(&instruction, "").await?;
        tracing::info!(chars = report.chars().count(), "report drafted");
        state.report_text = Some(report);
        Ok((state, Next::Continue))
    }
}
