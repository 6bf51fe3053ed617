//! Shared fixtures for workflow integration tests: a seeded SQLite database,
//! recording/failing chart renderers, a counting and a failing data store, and a
//! stateless keyword LLM for concurrent runs.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reportflow::{
    AgentError, ChartError, ChartRef, ChartRenderer, DataStore, LlmClient, LlmResponse, Message,
    QuerySpec, ReportWorkflow, ResultTable, SqliteDataStore, StoreError, WorkflowConfig,
};
use tempfile::TempDir;

/// SQLite file with a `sales_data` table: three products, two monthly columns.
pub struct SalesDb {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl SalesDb {
    pub fn seeded() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales_data.db");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE sales_data ("ID" TEXT, "품목" TEXT, "함량" TEXT, "2024-01" REAL, "2024-02" REAL);
            INSERT INTO sales_data VALUES ('C001', 'ABC', '10mg', 100.0, 120.0);
            INSERT INTO sales_data VALUES ('C002', 'XYZ', '20mg', 80.0, 90.0);
            INSERT INTO sales_data VALUES ('C003', '서울', '5mg', 20.0, 30.0);
            "#,
        )
        .unwrap();
        Self { dir, path }
    }

    pub fn store(&self) -> Arc<SqliteDataStore> {
        Arc::new(SqliteDataStore::new(&self.path))
    }
}

/// Renderer that records each call and returns `chart-<n>.svg`.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Mutex<Vec<(Vec<String>, Vec<f64>)>>,
}

impl RecordingRenderer {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChartRenderer for RecordingRenderer {
    async fn render_line_chart(
        &self,
        _title: &str,
        labels: &[String],
        values: &[f64],
    ) -> Result<ChartRef, ChartError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((labels.to_vec(), values.to_vec()));
        Ok(ChartRef(format!("chart-{}.svg", calls.len())))
    }
}

pub struct FailingRenderer;

#[async_trait]
impl ChartRenderer for FailingRenderer {
    async fn render_line_chart(
        &self,
        _title: &str,
        _labels: &[String],
        _values: &[f64],
    ) -> Result<ChartRef, ChartError> {
        Err(ChartError::InvalidSeries("renderer offline".into()))
    }
}

/// Wraps a store and counts `execute` calls.
pub struct CountingStore<D> {
    pub inner: D,
    pub calls: AtomicUsize,
}

impl<D> CountingStore<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<D: DataStore> DataStore for CountingStore<D> {
    async fn execute(&self, query: &QuerySpec) -> Result<ResultTable, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(query).await
    }
}

pub struct FailingStore;

#[async_trait]
impl DataStore for FailingStore {
    async fn execute(&self, _query: &QuerySpec) -> Result<ResultTable, StoreError> {
        Err(StoreError::Open("database is locked".into()))
    }
}

/// Stateless LLM answering by instruction kind, so concurrent runs do not share a script.
///
/// Classification: `PerformanceReport` when the request mentions 보고서 or report.
/// Extraction: `서울` when the request mentions it, otherwise `All`.
/// Drafting: `REPORT for <subject line>`.
pub struct KeywordLlm;

#[async_trait]
impl LlmClient for KeywordLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let system = messages.first().map(Message::content).unwrap_or_default();
        let user = messages.get(1).map(Message::content).unwrap_or_default();
        let content = if system.starts_with("Classify") {
            if user.contains("보고서") || user.to_lowercase().contains("report") {
                "PerformanceReport".to_string()
            } else {
                "Other".to_string()
            }
        } else if system.starts_with("Extract") {
            if user.contains("서울") { "서울" } else { "All" }.to_string()
        } else {
            let subject = system
                .lines()
                .find(|l| l.starts_with("Subject:"))
                .unwrap_or("Subject: ?");
            format!("REPORT for {}", subject)
        };
        Ok(LlmResponse {
            content,
            usage: None,
        })
    }
}

pub fn workflow(
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn DataStore>,
    charts: Arc<dyn ChartRenderer>,
) -> ReportWorkflow {
    ReportWorkflow::new(WorkflowConfig::default(), llm, store, charts).unwrap()
}
