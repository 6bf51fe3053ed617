//! Chart renderer seam.
//!
//! Charting is best-effort: the chart node turns any [`ChartError`] into an absent
//! chart reference. [`FileChartRenderer`] writes an SVG line chart to disk.

mod svg;

pub use svg::FileChartRenderer;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Opaque reference to a rendered chart (for the file renderer, the file path).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChartRef(pub String);

impl std::fmt::Display for ChartRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    /// Labels and values are empty, differ in length, or contain non-finite values.
    #[error("invalid series: {0}")]
    InvalidSeries(String),
    #[error("write chart: {0}")]
    Io(#[from] std::io::Error),
}

/// Draws a line chart and returns a reference to it.
///
/// **Interaction**: Called by `RenderChartNode` with the trend series.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    async fn render_line_chart(
        &self,
        title: &str,
        labels: &[String],
        values: &[f64],
    ) -> Result<ChartRef, ChartError>;
}
