//! reportflow CLI binary: turn a report request into an analytical report.
//!
//! Subcommands: `run` (one request), `repl` (interactive console), `check` (config and
//! database health), `graph` (print the workflow topology).

mod logging;
mod repl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{
    build_workflow, check_store, graph_only_workflow, render_health, resolve, truncate_message,
    CliError, Overrides, ResolvedConfig, APP_NAME,
};
use repl::run_repl_loop;

#[derive(Parser, Debug)]
#[command(name = "reportflow")]
#[command(about = "reportflow: generate a sales performance report from a request")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// OpenAI-compatible base URL
    #[arg(long, env = "OPENAI_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Model id (default gpt-4o)
    #[arg(long, env = "REPORTFLOW_MODEL", global = true)]
    model: Option<String>,

    /// Sampling temperature (default 0.1)
    #[arg(long, global = true)]
    temperature: Option<f32>,

    /// SQLite database holding the sales table
    #[arg(long, env = "REPORTFLOW_DB", value_name = "PATH", global = true)]
    db: Option<PathBuf>,

    /// Table to query (default sales_data)
    #[arg(long, global = true)]
    table: Option<String>,

    /// Language the report is written in (default Korean)
    #[arg(long, global = true)]
    language: Option<String>,

    /// Directory for chart files (default ./charts)
    #[arg(long, value_name = "DIR", global = true)]
    chart_dir: Option<PathBuf>,

    /// Also append logs to a daily file in this directory
    #[arg(long, env = "REPORTFLOW_LOG_DIR", value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// Verbose: log node enter/exit and routing to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run one request and print the answer
    Run(RunArgs),
    /// Interactive console: one request per line
    Repl(ReplArgs),
    /// Validate configuration and open the database table
    Check,
    /// Print the workflow graph
    Graph(GraphArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct RunArgs {
    /// Request text, e.g. "ABC 고객사 매출 보고서를 작성해줘"
    #[arg(required = true, trailing_var_arg = true)]
    request: Vec<String>,

    /// Print the whole final state as JSON instead of the answer
    #[arg(long)]
    json: bool,

    /// Max chars of the printed answer; 0 means no limit
    #[arg(long, default_value_t = 0)]
    max_reply_len: usize,
}

#[derive(clap::Args, Debug, Clone)]
struct ReplArgs {
    /// Max chars of each printed answer; 0 means no limit
    #[arg(long, default_value_t = 0)]
    max_reply_len: usize,
}

#[derive(clap::Args, Debug, Clone)]
struct GraphArgs {
    /// Graphviz DOT instead of plain text
    #[arg(long)]
    dot: bool,
}

fn overrides(args: &Args) -> Overrides {
    Overrides {
        api_key: args.api_key.clone(),
        base_url: args.base_url.clone(),
        model: args.model.clone(),
        temperature: args.temperature,
        database: args.db.clone(),
        table: args.table.clone(),
        language: args.language.clone(),
        chart_dir: args.chart_dir.clone(),
    }
}

async fn dispatch(cmd: Command, resolved: &ResolvedConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Run(run) => {
            let workflow = build_workflow(resolved)?;
            let request = run.request.join(" ");
            if run.json {
                let state = workflow.run_state(&request).await.map_err(CliError::from)?;
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                let answer = workflow.run(&request).await.map_err(CliError::from)?;
                println!("{}", truncate_message(&answer, run.max_reply_len));
            }
        }
        Command::Repl(repl) => {
            let workflow = build_workflow(resolved)?;
            run_repl_loop(&workflow, repl.max_reply_len).await?;
        }
        Command::Check => {
            let health = check_store(resolved).await?;
            print!("{}", render_health(resolved, &health)?);
        }
        Command::Graph(graph) => {
            let workflow = graph_only_workflow(resolved)?;
            if graph.dot {
                print!("{}", reportflow::generate_dot(workflow.graph()));
            } else {
                print!("{}", reportflow::generate_text(workflow.graph()));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Env must be populated before clap reads its `env` fallbacks.
    config::load_and_apply(APP_NAME, None::<&std::path::Path>).ok();

    let args = Args::parse();
    let _log_guard = logging::init(args.verbose, args.log_dir.as_deref())?;

    let settings = match config::load_report_settings(APP_NAME) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring [report] settings");
            config::ReportSettings::default()
        }
    };
    let resolved = resolve(overrides(&args), settings);

    if let Err(e) = dispatch(args.cmd, &resolved).await {
        eprintln!("reportflow: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_joins_request_words() {
        let args = Args::try_parse_from(["reportflow", "run", "ABC", "고객사", "보고서"]).unwrap();
        match args.cmd {
            Command::Run(r) => assert_eq!(r.request.join(" "), "ABC 고객사 보고서"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_reach_overrides() {
        let args = Args::try_parse_from([
            "reportflow",
            "graph",
            "--dot",
            "--db",
            "/tmp/x.db",
            "--language",
            "English",
        ])
        .unwrap();
        let o = overrides(&args);
        assert_eq!(o.database, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(o.language.as_deref(), Some("English"));
        assert!(matches!(args.cmd, Command::Graph(GraphArgs { dot: true })));
    }

    #[test]
    fn run_requires_request_text() {
        assert!(Args::try_parse_from(["reportflow", "run"]).is_err());
    }
}
