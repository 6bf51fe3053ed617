//! Metrics computed from a fetched result table.
//!
//! [`analyze`] is pure: the same table always yields the same [`Analysis`]. An empty
//! table yields the [`Analysis::NoData`] marker instead of metrics.
//!
//! Period columns are those whose name starts with a four-digit year and a dash
//! (`2024-01`, `2023-12 매출`); each contributes one point to the trend series, the sum
//! of its numeric cells, in column order.

mod stats;

pub use stats::ColumnSummary;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::state::{ResultTable, Value};

/// Error text carried by [`Analysis::NoData`].
pub const NO_DATA_ERROR: &str = "no data matched the request";

static PERIOD_COLUMN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-").expect("period column pattern is valid"));

/// One point of the trend series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: String,
    pub total: f64,
}

/// Metrics for a non-empty table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metrics {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    /// One entry per numeric column, in column order.
    pub numeric_summary: Vec<ColumnSummary>,
    /// Sums of period columns, in column order. Empty when no period columns exist.
    pub trend: Vec<TrendPoint>,
}

/// Output of the analysis node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis {
    /// Nothing to analyze.
    NoData { error: String },
    /// Computed metrics.
    Metrics(Metrics),
}

impl Analysis {
    pub fn no_data() -> Self {
        Analysis::NoData {
            error: NO_DATA_ERROR.to_string(),
        }
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        match self {
            Analysis::Metrics(m) => Some(m),
            Analysis::NoData { .. } => None,
        }
    }

    /// Trend series; empty for `NoData`.
    pub fn trend(&self) -> &[TrendPoint] {
        self.metrics().map(|m| m.trend.as_slice()).unwrap_or(&[])
    }
}

/// Returns true when `name` looks like a calendar period column.
pub fn is_period_column(name: &str) -> bool {
    PERIOD_COLUMN.is_match(name)
}

/// Computes metrics for `table`.
pub fn analyze(table: &ResultTable) -> Analysis {
    if table.is_empty() {
        return Analysis::no_data();
    }

    let mut numeric_summary = Vec::new();
    let mut trend = Vec::new();
    for (idx, column) in table.columns().iter().enumerate() {
        if let Some(values) = numeric_values(table, idx) {
            if let Some(summary) = ColumnSummary::describe(column.clone(), &values) {
                numeric_summary.push(summary);
            }
        }
        if is_period_column(column) {
            let total = table.column_values(idx).filter_map(Value::as_f64).sum();
            trend.push(TrendPoint {
                period: column.clone(),
                total,
            });
        }
    }

    Analysis::Metrics(Metrics {
        row_count: table.row_count(),
        column_count: table.column_count(),
        columns: table.columns().to_vec(),
        numeric_summary,
        trend,
    })
}

/// Non-null values of column `idx` when every one of them is numeric.
fn numeric_values(table: &ResultTable, idx: usize) -> Option<Vec<f64>> {
    let mut out = Vec::new();
    for value in table.column_values(idx).filter(|v| !v.is_null()) {
        out.push(value.as_f64()?);
    }
    (!out.is_empty()).then_some(out)
}
