//! Example: full report run offline.
//!
//! Seeds a temporary SQLite `sales_data` table, scripts the model replies with
//! `MockLlm`, writes the trend chart as SVG into the temp dir and prints the answer.
//!
//! Run: `cargo run -p reportflow-examples --example mock_report -- "서울 지역 실적 보고서"`

use std::env;
use std::sync::Arc;

use reportflow::{FileChartRenderer, MockLlm, ReportWorkflow, SqliteDataStore, WorkflowConfig};
use tracing_subscriber::EnvFilter;

fn seed(path: &std::path::Path) -> rusqlite::Result<()> {
    let conn = rusqlite::Connection::open(path)?;
    conn.execute_batch(
        r#"
        CREATE TABLE sales_data ("ID" TEXT, "품목" TEXT, "함량" TEXT,
                                 "2024-01" REAL, "2024-02" REAL, "2024-03" REAL);
        INSERT INTO sales_data VALUES ('C001', 'ABC', '10mg', 120.0, 135.5, 150.0);
        INSERT INTO sales_data VALUES ('C002', 'XYZ', '20mg',  80.0,  78.0,  91.0);
        INSERT INTO sales_data VALUES ('C003', '서울', '5mg',   40.0,  52.0,  61.5);
        "#,
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let request = env::args()
        .nth(1)
        .unwrap_or_else(|| "전체 매출 현황 보고서를 만들어주세요".to_string());
    let entity = if request.contains("서울") { "서울" } else { "All" };

    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("sales_data.db");
    seed(&db_path)?;

    let llm = MockLlm::scripted([
        "PerformanceReport".to_string(),
        entity.to_string(),
        format!("## Executive summary\nSales for {} grew steadily over the quarter.", entity),
    ]);
    let workflow = ReportWorkflow::new(
        WorkflowConfig::default(),
        Arc::new(llm),
        Arc::new(SqliteDataStore::new(&db_path)),
        Arc::new(FileChartRenderer::new(dir.path())),
    )?;

    let state = workflow.run_state(&request).await?;
    if let Some(analysis) = &state.analysis {
        println!("analysis:\n{}\n", serde_json::to_string_pretty(analysis)?);
    }
    println!("{}", state.final_answer.unwrap_or_default());
    Ok(())
}
