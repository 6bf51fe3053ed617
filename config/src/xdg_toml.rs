//! Load `$XDG_CONFIG_HOME/<app>/config.toml`: the `[env]` table and the `[report]` settings.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::{LoadError, ReportSettings};

/// `$XDG_CONFIG_HOME` when set, else the platform config dir.
fn config_home() -> Result<PathBuf, LoadError> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => dirs::config_dir()
            .ok_or_else(|| LoadError::XdgPath("no config directory for this platform".into())),
    }
}

pub fn config_path(app_name: &str) -> Result<PathBuf, LoadError> {
    Ok(config_home()?.join(app_name).join("config.toml"))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
    #[serde(default)]
    report: ReportSettings,
}

fn load_config_file(app_name: &str) -> Result<ConfigFile, LoadError> {
    let path = config_path(app_name)?;
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    Ok(toml::from_str(&content)?)
}

/// Env key-value pairs from `[env]`. Missing file or section returns an empty map.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    Ok(load_config_file(app_name)?.env)
}

/// The `[report]` table. Missing file or section returns default (all unset) settings.
pub fn load_report_settings(app_name: &str) -> Result<ReportSettings, LoadError> {
    Ok(load_config_file(app_name)?.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_env::with_xdg_home;

    #[test]
    fn missing_config_returns_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let map = with_xdg_home(dir.path(), || load_env_map("reportflow")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn load_env_map_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("testapp");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(
            app_dir.join("config.toml"),
            r#"
[env]
FOO = "from_toml"
BAR = "baz"
"#,
        )
        .unwrap();

        let map = with_xdg_home(dir.path(), || load_env_map("testapp")).unwrap();
        assert_eq!(map.get("FOO"), Some(&"from_toml".to_string()));
        assert_eq!(map.get("BAR"), Some(&"baz".to_string()));
    }

    #[test]
    fn invalid_toml_returns_xdg_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("badapp");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), "not valid toml [[[\n").unwrap();

        let result = with_xdg_home(dir.path(), || load_env_map("badapp"));
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }

    #[test]
    fn report_section_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("reportapp");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(
            app_dir.join("config.toml"),
            r#"
[report]
model = "gpt-4o-mini"
database = "/data/sales.db"
table = "orders"
match_columns = ["client", "region"]
language = "English"
chart_dir = "charts"
"#,
        )
        .unwrap();

        let s = with_xdg_home(dir.path(), || load_report_settings("reportapp")).unwrap();
        assert_eq!(s.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(s.database, Some(PathBuf::from("/data/sales.db")));
        assert_eq!(s.table.as_deref(), Some("orders"));
        assert_eq!(
            s.match_columns,
            Some(vec!["client".to_string(), "region".to_string()])
        );
        assert_eq!(s.language.as_deref(), Some("English"));
        assert_eq!(s.chart_dir, Some(PathBuf::from("charts")));
        assert!(s.temperature.is_none());
    }

    #[test]
    fn config_without_report_section_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("noreport");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), "[env]\nA = \"1\"\n").unwrap();

        let s = with_xdg_home(dir.path(), || load_report_settings("noreport")).unwrap();
        assert_eq!(s, ReportSettings::default());
    }
}
