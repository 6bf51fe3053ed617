//! Load configuration from XDG `config.toml` and project `.env`, then apply to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! The same `config.toml` may carry a `[report]` table with defaults for the report CLI
//! ([`ReportSettings`]); command-line flags and environment variables override it.
//!
//! ```toml
//! [env]
//! OPENAI_API_KEY = "sk-..."
//!
//! [report]
//! database = "/srv/data/sales_data.db"
//! language = "English"
//! ```

mod dotenv_file;
mod xdg_toml;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub use xdg_toml::config_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    Dotenv(String),
}

/// Optional defaults from the `[report]` table. Unset fields fall back to the
/// workflow defaults.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportSettings {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    /// SQLite file holding the sales table.
    pub database: Option<PathBuf>,
    pub table: Option<String>,
    pub match_columns: Option<Vec<String>>,
    /// Report language, e.g. `Korean`.
    pub language: Option<String>,
    /// Where chart files are written.
    pub chart_dir: Option<PathBuf>,
}

/// Loads config from XDG `config.toml` and optional project `.env`, then sets environment
/// variables only for keys that are **not** already set (so existing env has highest priority).
///
/// Order of precedence when a key is missing in the process environment:
/// 1. Value from project `.env` (current directory or `override_dir` if given)
/// 2. Value from `$XDG_CONFIG_HOME/<app_name>/config.toml` `[env]` table
///
/// * `app_name`: e.g. `"reportflow"`, used for the path `~/.config/<app_name>/config.toml`.
/// * `override_dir`: if `Some`, look for `.env` in this directory instead of `std::env::current_dir()`.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv_file::load_env_map(override_dir)?;

    let mut keys: std::collections::HashSet<String> = xdg_map.keys().cloned().collect();
    keys.extend(dotenv_map.keys().cloned());

    for key in keys {
        if std::env::var_os(&key).is_some() {
            continue;
        }
        let value = dotenv_map.get(&key).or_else(|| xdg_map.get(&key)).cloned();
        if let Some(v) = value {
            std::env::set_var(&key, v);
        }
    }

    Ok(())
}

/// Reads the `[report]` table from `$XDG_CONFIG_HOME/<app_name>/config.toml`.
pub fn load_report_settings(app_name: &str) -> Result<ReportSettings, LoadError> {
    xdg_toml::load_report_settings(app_name)
}
