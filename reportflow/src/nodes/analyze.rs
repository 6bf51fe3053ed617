//! Analysis node: metrics over the fetched table.

use async_trait::async_trait;

use crate::analysis::analyze;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::{ReportState, ResultTable};

pub struct AnalyzeNode;

#[async_trait]
impl Node<ReportState> for AnalyzeNode {
    fn id(&self) -> &str {
        super::ANALYZE
    }

    async fn run(&self, mut state: ReportState) -> Result<(ReportState, Next), AgentError> {
        let empty = ResultTable::empty();
        let analysis = analyze(state.result_table.as_ref().unwrap_or(&empty));
        tracing::debug!(
            has_data = analysis.metrics().is_some(),
            trend_points = analysis.trend().len(),
            "analysis computed"
        );
        state.analysis = Some(analysis);
        Ok((state, Next::Continue))
    }
}
