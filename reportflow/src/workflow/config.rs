//! Explicit configuration for a [`ReportWorkflow`](super::ReportWorkflow).
//!
//! Every value the pipeline needs arrives here at construction; nothing under
//! `reportflow` reads the process environment. The CLI fills this from flags,
//! environment variables and the `[report]` settings table.

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_TABLE: &str = "sales_data";
pub const DEFAULT_REPORT_LANGUAGE: &str = "Korean";

/// Columns a named entity is matched against.
pub fn default_match_columns() -> Vec<String> {
    ["ID", "품목", "함량"].iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// No API key was supplied for the language-model client.
    #[error("missing API key for the language model (set OPENAI_API_KEY or pass --api-key)")]
    MissingApiKey,
    #[error("model name must not be empty")]
    EmptyModel,
    #[error("temperature must be within 0..=2, got {0}")]
    InvalidTemperature(f32),
    #[error("table name must not be empty")]
    EmptyTable,
    #[error("at least one match column is required")]
    NoMatchColumns,
    #[error("report language must not be empty")]
    EmptyLanguage,
}

/// Language-model settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// OpenAI-compatible endpoint; `None` uses the public API.
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Data-source settings used by the query builder.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub table: String,
    pub match_columns: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            match_columns: default_match_columns(),
        }
    }
}

/// Configuration for one [`ReportWorkflow`](super::ReportWorkflow).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkflowConfig {
    pub llm: LlmConfig,
    pub data: DataConfig,
    /// Language the drafted report is written in.
    pub report_language: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            data: DataConfig::default(),
            report_language: DEFAULT_REPORT_LANGUAGE.to_string(),
        }
    }
}

impl WorkflowConfig {
    /// Checks the values the workflow itself depends on.
    ///
    /// The API key is not checked here; a workflow built around a mock client
    /// has no use for one. `ChatOpenAI::from_config` checks it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidTemperature(self.llm.temperature));
        }
        if self.data.table.trim().is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        if self.data.match_columns.iter().all(|c| c.trim().is_empty()) {
            return Err(ConfigError::NoMatchColumns);
        }
        if self.report_language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }
        Ok(())
    }
}
