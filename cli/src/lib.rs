//! Library side of the `reportflow` binary: settings resolution, workflow construction
//! and output helpers. The binary in `main.rs` only parses arguments and prints.

mod run;
mod settings;

pub use run::{
    build_workflow, check_store, graph_only_workflow, render_health, truncate_message, CliError,
};
pub use settings::{resolve, Overrides, ResolvedConfig, DEFAULT_CHART_DIR, DEFAULT_DATABASE};

/// Name used for `~/.config/<APP_NAME>/config.toml`.
pub const APP_NAME: &str = "reportflow";
