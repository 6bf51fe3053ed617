//! Review decision node: flag reports built on missing or thin data.

use async_trait::async_trait;

use crate::analysis::Analysis;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::ReportState;

/// Review policy. A report needs a human when there was no data, zero rows, or
/// no trend series to back it.
pub fn needs_review(analysis: &Analysis) -> bool {
    match analysis {
        Analysis::NoData { .. } => true,
        Analysis::Metrics(m) => m.row_count == 0 || m.trend.is_empty(),
    }
}

pub struct ReviewDecisionNode;

#[async_trait]
impl Node<ReportState> for ReviewDecisionNode {
    fn id(&self) -> &str {
        super::REVIEW_DECISION
    }

    async fn run(&self, mut state: ReportState) -> Result<(ReportState, Next), AgentError> {
        let review = state.analysis.as_ref().map_or(true, needs_review);
        tracing::info!(needs_review = review, "review decision");
        state.needs_review = Some(review);
        Ok((state, Next::Continue))
    }
}
