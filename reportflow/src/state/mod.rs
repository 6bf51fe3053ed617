//! State record threaded through the report workflow.
//!
//! [`ReportState`] is created with only `request_text` set, handed to
//! [`CompiledStateGraph::invoke`](crate::graph::CompiledStateGraph::invoke), filled in
//! node by node, and dropped once the caller has read `final_answer`.
//!
//! # Example
//!
//! ```rust
//! use reportflow::ReportState;
//!
//! let state = ReportState::new("전체 매출 현황 보고서를 만들어주세요");
//! assert!(state.task_kind.is_none());
//! assert!(state.final_answer.is_none());
//! ```

mod table;

pub use table::{ResultTable, Value};

use serde::Serialize;

use crate::analysis::Analysis;
use crate::chart::ChartRef;
use crate::store::QuerySpec;

/// Sentinel the entity extractor returns when the request names no entity.
pub const ALL_ENTITIES: &str = "All";

/// Localized sentinel accepted as a synonym for [`ALL_ENTITIES`].
const ALL_ENTITIES_KO: &str = "전체";

/// Classification of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TaskKind {
    PerformanceReport,
    Other,
}

impl TaskKind {
    /// Label the classifier is asked to answer with.
    pub const PERFORMANCE_REPORT_LABEL: &'static str = "PerformanceReport";

    /// Reads a classifier reply. Only a reply containing the `PerformanceReport`
    /// label counts as a report request; anything else falls back to `Other`.
    pub fn from_response(raw: &str) -> Self {
        if raw.contains(Self::PERFORMANCE_REPORT_LABEL) {
            TaskKind::PerformanceReport
        } else {
            TaskKind::Other
        }
    }
}

/// Scope of the report: everything, or one named client/product/region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityFilter {
    All,
    Named(String),
}

impl Serialize for EntityFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl EntityFilter {
    /// Reads an extractor reply: trims whitespace and wrapping quotes, maps the
    /// sentinel (or an empty reply) to [`EntityFilter::All`].
    pub fn from_response(raw: &str) -> Self {
        let value = raw
            .trim()
            .trim_matches(|c| c == '"' || c == '\'' || c == '`')
            .trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case(ALL_ENTITIES)
            || value == ALL_ENTITIES_KO
        {
            EntityFilter::All
        } else {
            EntityFilter::Named(value.to_string())
        }
    }

    /// Text form: the sentinel or the entity name. Never empty.
    pub fn as_str(&self) -> &str {
        match self {
            EntityFilter::All => ALL_ENTITIES,
            EntityFilter::Named(v) => v,
        }
    }
}

impl std::fmt::Display for EntityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed state record for one workflow run.
///
/// Fields are populated strictly in pipeline order; each is `None` until its
/// producing node runs. `final_answer` is written once, by the terminal node.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReportState {
    /// Original user input.
    pub request_text: String,
    /// Set by `classify`.
    pub task_kind: Option<TaskKind>,
    /// Set by `extract_entity`.
    pub entity_filter: Option<EntityFilter>,
    /// Set by `build_query`.
    pub query_spec: Option<QuerySpec>,
    /// Set by `fetch_data`; empty when the store failed.
    pub result_table: Option<ResultTable>,
    /// Set by `analyze`.
    pub analysis: Option<Analysis>,
    /// Set by `render_chart`; `None` when no chart was produced.
    pub chart_ref: Option<ChartRef>,
    /// Set by `draft_report`.
    pub report_text: Option<String>,
    /// Set by `review_decision`; only meaningful for report requests.
    pub needs_review: Option<bool>,
    /// Set by `final_answer`; the only field callers read.
    pub final_answer: Option<String>,
}

impl ReportState {
    /// Fresh record for one run.
    pub fn new(request_text: impl Into<String>) -> Self {
        Self {
            request_text: request_text.into(),
            ..Self::default()
        }
    }

    pub fn is_performance_report(&self) -> bool {
        self.task_kind == Some(TaskKind::PerformanceReport)
    }
}
