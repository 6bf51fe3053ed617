//! Routers for the two conditional edges.

use crate::graph::EdgeLabel;
use crate::state::ReportState;

/// Edge labels after `classify`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskRoute {
    PerformanceReport,
    Other,
}

impl EdgeLabel for TaskRoute {
    fn all() -> &'static [Self] {
        &[TaskRoute::PerformanceReport, TaskRoute::Other]
    }

    fn as_str(&self) -> &'static str {
        match self {
            TaskRoute::PerformanceReport => "performance_report",
            TaskRoute::Other => "other",
        }
    }
}

/// Edge labels after `review_decision`. Both currently lead to `final_answer`;
/// `NeedsReview` is where a human-review step would attach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewRoute {
    NeedsReview,
    Auto,
}

impl EdgeLabel for ReviewRoute {
    fn all() -> &'static [Self] {
        &[ReviewRoute::NeedsReview, ReviewRoute::Auto]
    }

    fn as_str(&self) -> &'static str {
        match self {
            ReviewRoute::NeedsReview => "needs_review",
            ReviewRoute::Auto => "auto",
        }
    }
}

pub fn route_by_task(state: &ReportState) -> TaskRoute {
    if state.is_performance_report() {
        TaskRoute::PerformanceReport
    } else {
        TaskRoute::Other
    }
}

pub fn route_by_review(state: &ReportState) -> ReviewRoute {
    if state.needs_review.unwrap_or(false) {
        ReviewRoute::NeedsReview
    } else {
        ReviewRoute::Auto
    }
}
