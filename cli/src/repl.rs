//! Interactive console: read a request, run the workflow, print the answer, repeat.
//!
//! Ends on EOF (Ctrl+D) or a quit word. A failed run is printed to stderr and the
//! loop continues.

use std::io::Write;

use reportflow::ReportWorkflow;
use tokio::io::{AsyncBufReadExt, BufReader};

const BANNER: &str = "reportflow console. Describe the report you need (quit/exit/종료 to leave).";

pub async fn run_repl_loop(
    workflow: &ReportWorkflow,
    max_reply_len: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", BANNER);
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match reader.next_line().await? {
            None => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) if is_quit_command(&s) => break,
            Some(s) => s,
        };

        match workflow.run(line.trim()).await {
            Ok(answer) => println!("{}\n", cli::truncate_message(&answer, max_reply_len)),
            Err(e) => eprintln!("error: {}", e),
        }
    }

    println!("Bye.");
    Ok(())
}

fn is_quit_command(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    matches!(lower.as_str(), "quit" | "exit" | "/quit" | "종료")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_quit_command_matches_expected_tokens() {
        assert!(is_quit_command("quit"));
        assert!(is_quit_command(" EXIT "));
        assert!(is_quit_command("/quit"));
        assert!(is_quit_command("종료"));
        assert!(!is_quit_command("전체 매출 보고서"));
    }
}
