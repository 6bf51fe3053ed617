//! Data store seam: executes a [`QuerySpec`] and returns a [`ResultTable`].
//!
//! The store is treated as already populated; ingestion and schema creation are
//! the caller's responsibility. [`SqliteDataStore`] is the bundled implementation.

mod query;
mod sqlite;

pub use query::{QuerySpec, SqlQuery, SubstringFilter};
pub use sqlite::{SqliteDataStore, StoreHealth};

use async_trait::async_trait;
use thiserror::Error;

use crate::state::ResultTable;

/// Data-store failure. Never aborts a run: the fetch node degrades it to an empty table.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database file could not be opened.
    #[error("open database: {0}")]
    Open(String),
    /// Query preparation or execution failed (bad table, bad column, locked db).
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
    /// The blocking worker did not complete.
    #[error("store task failed: {0}")]
    Task(String),
}

/// Executes queries against the backing data. Must be safe for concurrent runs.
///
/// **Interaction**: Called by `FetchDataNode`.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Runs `query` and returns all rows in store order (possibly none).
    async fn execute(&self, query: &QuerySpec) -> Result<ResultTable, StoreError>;
}
