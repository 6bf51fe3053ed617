//! Chart node: draw the trend series when there is one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::chart::ChartRenderer;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::ReportState;

/// Title of the trend chart.
pub const CHART_TITLE: &str = "Monthly sales trend";

/// Writes `chart_ref`. Best effort: no trend or a renderer error leaves it `None`.
pub struct RenderChartNode {
    renderer: Arc<dyn ChartRenderer>,
}

impl RenderChartNode {
    pub fn new(renderer: Arc<dyn ChartRenderer>) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl Node<ReportState> for RenderChartNode {
    fn id(&self) -> &str {
        super::RENDER_CHART
    }

    async fn run(&self, mut state: ReportState) -> Result<(ReportState, Next), AgentError> {
        let trend = state.analysis.as_ref().map(|a| a.trend()).unwrap_or(&[]);
        state.chart_ref = if trend.is_empty() {
            tracing::debug!("no trend series; skipping chart");
            None
        } else {
            let labels: Vec<String> = trend.iter().map(|p| p.period.clone()).collect();
            let values: Vec<f64> = trend.iter().map(|p| p.total).collect();
            match self
                .renderer
                .render_line_chart(CHART_TITLE, &labels, &values)
                .await
            {
                Ok(chart) => {
                    tracing::info!(chart = %chart, "chart rendered");
                    Some(chart)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "chart rendering failed; continuing without chart");
                    None
                }
            }
        };
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::analysis::{Analysis, Metrics, TrendPoint};
    use crate::chart::{ChartError, ChartRef};

    #[derive(Default)]
    struct Recording(Mutex<Vec<(String, Vec<String>, Vec<f64>)>>);

    #[async_trait]
    impl ChartRenderer for Recording {
        async fn render_line_chart(
            &self,
            title: &str,
            labels: &[String],
            values: &[f64],
        ) -> Result<ChartRef, ChartError> {
            self.0
                .lock()
                .unwrap()
                .push((title.to_string(), labels.to_vec(), values.to_vec()));
            Ok(ChartRef("chart.svg".into()))
        }
    }

    struct Broken;

    #[async_trait]
    impl ChartRenderer for Broken {
        async fn render_line_chart(
            &self,
            _title: &str,
            _labels: &[String],
            _values: &[f64],
        ) -> Result<ChartRef, ChartError> {
            Err(ChartError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn with_trend(trend: Vec<TrendPoint>) -> ReportState {
        ReportState {
            analysis: Some(Analysis::Metrics(Metrics {
                row_count: 1,
                column_count: trend.len(),
                columns: trend.iter().map(|p| p.period.clone()).collect(),
                numeric_summary: vec![],
                trend,
            })),
            ..ReportState::new("req")
        }
    }

    fn point(period: &str, total: f64) -> TrendPoint {
        TrendPoint {
            period: period.into(),
            total,
        }
    }

    #[tokio::test]
    async fn renders_trend_in_order() {
        let renderer = Arc::new(Recording::default());
        let node = RenderChartNode::new(renderer.clone());
        let s = with_trend(vec![point("2024-01", 4.0), point("2024-02", 5.0)]);
        let (state, _) = node.run(s).await.unwrap();
        assert_eq!(state.chart_ref, Some(ChartRef("chart.svg".into())));
        let calls = renderer.0.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, CHART_TITLE);
        assert_eq!(calls[0].1, vec!["2024-01", "2024-02"]);
        assert_eq!(calls[0].2, vec![4.0, 5.0]);
    }

    #[tokio::test]
    async fn no_trend_means_no_call() {
        let renderer = Arc::new(Recording::default());
        let node = RenderChartNode::new(renderer.clone());
        let (state, _) = node.run(with_trend(vec![])).await.unwrap();
        assert!(state.chart_ref.is_none());
        let s = ReportState {
            analysis: Some(Analysis::no_data()),
            ..ReportState::new("req")
        };
        let (state, _) = node.run(s).await.unwrap();
        assert!(state.chart_ref.is_none());
        assert!(renderer.0.lock().unwrap().is_empty());
    }

    /// **Scenario**: A renderer failure is swallowed; the run continues without a chart.
    #[tokio::test]
    async fn renderer_failure_is_not_fatal() {
        let node = RenderChartNode::new(Arc::new(Broken));
        let (state, next) = node
            .run(with_trend(vec![point("2024-01", 1.0)]))
            .await
            .unwrap();
        assert!(state.chart_ref.is_none());
        assert_eq!(next, Next::Continue);
    }
}
