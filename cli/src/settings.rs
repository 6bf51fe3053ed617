//! Merges command-line values with the `[report]` table from `config.toml`.
//!
//! Precedence per field: flag > environment variable (handled by clap's `env`) >
//! `[report]` setting > built-in default.

use std::path::PathBuf;

use config::ReportSettings;
use reportflow::WorkflowConfig;

/// SQLite file used when neither flag, env nor settings name one.
pub const DEFAULT_DATABASE: &str = "sales_data.db";
/// Chart output directory used when nothing else is configured.
pub const DEFAULT_CHART_DIR: &str = "charts";

/// Values given on the command line (or through their env fallbacks).
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub database: Option<PathBuf>,
    pub table: Option<String>,
    pub language: Option<String>,
    pub chart_dir: Option<PathBuf>,
}

/// Everything needed to build a workflow and its collaborators.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub workflow: WorkflowConfig,
    pub database: PathBuf,
    pub chart_dir: PathBuf,
}

pub fn resolve(overrides: Overrides, settings: ReportSettings) -> ResolvedConfig {
    let mut workflow = WorkflowConfig::default();

    workflow.llm.api_key = overrides.api_key.filter(|k| !k.trim().is_empty());
    workflow.llm.base_url = overrides.base_url.or(settings.base_url);
    if let Some(model) = overrides.model.or(settings.model) {
        workflow.llm.model = model;
    }
    if let Some(t) = overrides.temperature.or(settings.temperature) {
        workflow.llm.temperature = t;
    }
    if let Some(table) = overrides.table.or(settings.table) {
        workflow.data.table = table;
    }
    if let Some(columns) = settings.match_columns {
        workflow.data.match_columns = columns;
    }
    if let Some(language) = overrides.language.or(settings.language) {
        workflow.report_language = language;
    }

    ResolvedConfig {
        workflow,
        database: overrides
            .database
            .or(settings.database)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
        chart_dir: overrides
            .chart_dir
            .or(settings.chart_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_DIR)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let r = resolve(Overrides::default(), ReportSettings::default());
        assert_eq!(r.workflow, WorkflowConfig::default());
        assert_eq!(r.database, PathBuf::from(DEFAULT_DATABASE));
        assert_eq!(r.chart_dir, PathBuf::from(DEFAULT_CHART_DIR));
    }

    #[test]
    fn flags_win_over_settings() {
        let overrides = Overrides {
            model: Some("gpt-4o-mini".into()),
            database: Some(PathBuf::from("/flag.db")),
            language: Some("English".into()),
            ..Overrides::default()
        };
        let settings = ReportSettings {
            model: Some("from-settings".into()),
            database: Some(PathBuf::from("/settings.db")),
            language: Some("Japanese".into()),
            table: Some("orders".into()),
            ..ReportSettings::default()
        };
        let r = resolve(overrides, settings);
        assert_eq!(r.workflow.llm.model, "gpt-4o-mini");
        assert_eq!(r.database, PathBuf::from("/flag.db"));
        assert_eq!(r.workflow.report_language, "English");
        assert_eq!(r.workflow.data.table, "orders");
    }

    #[test]
    fn settings_fill_unset_flags() {
        let settings = ReportSettings {
            temperature: Some(0.5),
            match_columns: Some(vec!["client".into()]),
            chart_dir: Some(PathBuf::from("out/charts")),
            base_url: Some("http://localhost:8000/v1".into()),
            ..ReportSettings::default()
        };
        let r = resolve(Overrides::default(), settings);
        assert_eq!(r.workflow.llm.temperature, 0.5);
        assert_eq!(r.workflow.data.match_columns, vec!["client".to_string()]);
        assert_eq!(r.chart_dir, PathBuf::from("out/charts"));
        assert_eq!(
            r.workflow.llm.base_url.as_deref(),
            Some("http://localhost:8000/v1")
        );
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let overrides = Overrides {
            api_key: Some("  ".into()),
            ..Overrides::default()
        };
        let r = resolve(overrides, ReportSettings::default());
        assert!(r.workflow.llm.api_key.is_none());
    }
}
