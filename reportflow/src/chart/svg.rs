//! SVG line-chart writer.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ChartError, ChartRef, ChartRenderer};

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 90.0;

/// Writes each chart as `chart_<YYYYmmdd_HHMMSS>_<id>.svg` under `out_dir`.
///
/// The returned [`ChartRef`] is the written file path.
#[derive(Clone, Debug)]
pub struct FileChartRenderer {
    out_dir: PathBuf,
}

impl FileChartRenderer {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    fn file_name() -> String {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let id = uuid::Uuid::new_v4().simple().to_string();
        format!("chart_{}_{}.svg", stamp, &id[..8])
    }
}

fn validate(labels: &[String], values: &[f64]) -> Result<(), ChartError> {
    if values.is_empty() {
        return Err(ChartError::InvalidSeries("empty series".into()));
    }
    if labels.len() != values.len() {
        return Err(ChartError::InvalidSeries(format!(
            "{} labels for {} values",
            labels.len(),
            values.len()
        )));
    }
    if let Some(v) = values.iter().find(|v| !v.is_finite()) {
        return Err(ChartError::InvalidSeries(format!("non-finite value {}", v)));
    }
    Ok(())
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the SVG document. `labels` and `values` must already be validated.
pub(crate) fn line_chart_svg(title: &str, labels: &[String], values: &[f64]) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min).min(0.0);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let step = if values.len() > 1 {
        plot_w / (values.len() - 1) as f64
    } else {
        0.0
    };
    let x_of = |i: usize| MARGIN_LEFT + step * i as f64;
    let y_of = |v: f64| MARGIN_TOP + plot_h - (v - min) / span * plot_h;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="30" text-anchor="middle" font-size="20" font-weight="bold">{}</text>"#,
        WIDTH / 2.0,
        escape_xml(title)
    );
    let _ = writeln!(
        svg,
        r##"<g stroke="#ddd">"##
    );
    for k in 0..=4 {
        let v = min + span * f64::from(k) / 4.0;
        let y = y_of(v);
        let _ = writeln!(
            svg,
            r#"<line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}"/><text x="{tx}" y="{ty:.1}" text-anchor="end" font-size="11" stroke="none">{v:.0}</text>"#,
            x1 = MARGIN_LEFT,
            x2 = WIDTH - MARGIN_RIGHT,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
        );
    }
    let _ = writeln!(svg, "</g>");

    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{:.1},{:.1}", x_of(i), y_of(*v)))
        .collect();
    let _ = writeln!(
        svg,
        r##"<polyline fill="none" stroke="#1f77b4" stroke-width="2" points="{}"/>"##,
        points.join(" ")
    );
    for (i, (label, v)) in labels.iter().zip(values).enumerate() {
        let (x, y) = (x_of(i), y_of(*v));
        let _ = writeln!(
            svg,
            r##"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="#1f77b4"/><text transform="translate({x:.1},{ly}) rotate(-45)" text-anchor="end" font-size="11">{}</text>"##,
            escape_xml(label),
            ly = HEIGHT - MARGIN_BOTTOM + 16.0,
        );
    }
    svg.push_str("</svg>\n");
    svg
}

#[async_trait]
impl ChartRenderer for FileChartRenderer {
    async fn render_line_chart(
        &self,
        title: &str,
        labels: &[String],
        values: &[f64],
    ) -> Result<ChartRef, ChartError> {
        validate(labels, values)?;
        let svg = line_chart_svg(title, labels, values);
        tokio::fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(Self::file_name());
        tokio::fs::write(&path, svg).await?;
        tracing::debug!(path = %path.display(), points = values.len(), "chart written");
        Ok(ChartRef(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|m| format!("2024-{:02}", m)).collect()
    }

    #[tokio::test]
    async fn writes_svg_file_and_returns_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = FileChartRenderer::new(dir.path().join("charts"));
        let chart = renderer
            .render_line_chart("Monthly sales", &labels(3), &[10.0, 30.0, 20.0])
            .await
            .unwrap();
        let path = std::path::Path::new(&chart.0);
        assert!(path.starts_with(dir.path().join("charts")));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("chart_") && name.ends_with(".svg"), "{}", name);
        let body = std::fs::read_to_string(path).unwrap();
        assert!(body.starts_with("<svg"));
        assert!(body.contains("Monthly sales"));
        assert!(body.contains("2024-03"));
    }

    #[tokio::test]
    async fn rejects_mismatched_or_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = FileChartRenderer::new(dir.path());
        let err = renderer
            .render_line_chart("t", &labels(2), &[1.0])
            .await
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidSeries(_)));
        let err = renderer.render_line_chart("t", &[], &[]).await.unwrap_err();
        assert!(matches!(err, ChartError::InvalidSeries(_)));
        let err = renderer
            .render_line_chart("t", &labels(1), &[f64::NAN])
            .await
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidSeries(_)));
    }

    #[test]
    fn svg_escapes_labels_and_handles_single_point() {
        let svg = line_chart_svg("a < b", &["x&y".to_string()], &[5.0]);
        assert!(svg.contains("a &lt; b"));
        assert!(svg.contains("x&amp;y"));
        assert!(svg.contains("<polyline"));
    }
}
