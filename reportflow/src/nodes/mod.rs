//! The nine report-pipeline nodes and the two routers between them.
//!
//! Every node reads the fields written before it and writes only the field it
//! owns, then returns `Next::Continue`. Which node comes next is decided by the
//! graph built in [`crate::workflow`].

mod analyze;
mod build_query;
mod classify;
mod draft_report;
mod extract_entity;
mod fetch_data;
mod final_answer;
mod prompts;
mod render_chart;
mod review_decision;
mod routers;

pub use analyze::AnalyzeNode;
pub use build_query::BuildQueryNode;
pub use classify::ClassifyNode;
pub use draft_report::DraftReportNode;
pub use extract_entity::ExtractEntityNode;
pub use fetch_data::FetchDataNode;
pub use final_answer::{
    FinalAnswerNode, MISSING_REPORT_MESSAGE, REFUSAL_MESSAGE, REVIEW_NOTICE,
};
pub use render_chart::{RenderChartNode, CHART_TITLE};
pub use review_decision::{needs_review, ReviewDecisionNode};
pub use routers::{route_by_review, route_by_task, ReviewRoute, TaskRoute};

pub const CLASSIFY: &str = "classify";
pub const EXTRACT_ENTITY: &str = "extract_entity";
pub const BUILD_QUERY: &str = "build_query";
pub const FETCH_DATA: &str = "fetch_data";
pub const ANALYZE: &str = "analyze";
pub const RENDER_CHART: &str = "render_chart";
pub const DRAFT_REPORT: &str = "draft_report";
pub const REVIEW_DECISION: &str = "review_decision";
pub const FINAL_ANSWER: &str = "final_answer";
