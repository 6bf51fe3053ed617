//! Final answer node: the only writer of `final_answer`.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::ReportState;

/// Answer for requests that are not performance reports.
pub const REFUSAL_MESSAGE: &str = "Sorry, only performance report generation is supported at the moment.";

/// Prefix for reports flagged for human review.
pub const REVIEW_NOTICE: &str = "A performance report was generated, but it needs human review.";

/// Used in place of the report body when no draft exists.
pub const MISSING_REPORT_MESSAGE: &str = "An error occurred while generating the report.";

/// Assembles the answer. Makes no external calls and cannot fail.
pub struct FinalAnswerNode;

impl FinalAnswerNode {
    pub fn compose(state: &ReportState) -> String {
        if !state.is_performance_report() {
            return REFUSAL_MESSAGE.to_string();
        }
        let report = state
            .report_text
            .as_deref()
            .unwrap_or(MISSING_REPORT_MESSAGE);
        let mut answer = if state.needs_review.unwrap_or(false) {
            format!("{}\n\n{}", REVIEW_NOTICE, report)
        } else {
            report.to_string()
        };
        if let Some(chart) = &state.chart_ref {
            answer.push_str(&format!("\n\nChart generated: {}", chart));
        }
        answer
    }
}

#[async_trait]
impl Node<ReportState> for FinalAnswerNode {
    fn id(&self) -> &str {
        super::FINAL_ANSWER
    }

    async fn run(&self, mut state: ReportState) -> Result<(ReportState, Next), AgentError> {
        state.final_answer = Some(Self::compose(&state));
        Ok((state, Next::Continue))
    }
}
