//! SQLite-backed data store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags};

use crate::state::{ResultTable, Value};
use crate::store::{DataStore, QuerySpec, StoreError};

/// Read-only store over a SQLite file.
///
/// A connection is opened per call on the blocking pool, so one store can serve
/// concurrent runs without shared connection state.
#[derive(Clone, Debug)]
pub struct SqliteDataStore {
    db_path: PathBuf,
}

/// Result of [`SqliteDataStore::check`].
#[derive(Clone, Debug)]
pub struct StoreHealth {
    /// Tables present in the database, sorted by name.
    pub tables: Vec<String>,
    /// Total rows in the checked table.
    pub row_count: u64,
    /// First rows of the checked table.
    pub sample: ResultTable,
}

impl SqliteDataStore {
    /// Store over `path`. The file is not touched until the first query.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            db_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn open(db_path: &Path) -> Result<Connection, StoreError> {
        Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Open(format!("{}: {}", db_path.display(), e)))
    }

    /// Lists tables, counts rows of `table` and reads up to `sample_rows` of them.
    pub async fn check(&self, table: &str, sample_rows: u32) -> Result<StoreHealth, StoreError> {
        let db_path = self.db_path.clone();
        let table = table.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = Self::open(&db_path)?;
            let mut stmt = conn
                .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
            let tables = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;

            let quoted = format!("\"{}\"", table.replace('"', "\"\""));
            let row_count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {}", quoted), [], |row| row.get(0))?;
            let sample = run_select(
                &conn,
                &format!("SELECT * FROM {} LIMIT {}", quoted, sample_rows),
                &[],
            )?;
            Ok(StoreHealth {
                tables,
                row_count: row_count.max(0) as u64,
                sample,
            })
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

fn decode(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Text(format!("<blob {} bytes>", b.len())),
    }
}

fn run_select(conn: &Connection, sql: &str, params: &[String]) -> Result<ResultTable, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = columns.len();
    let mut table = ResultTable::new(columns);
    let mut rows = stmt.query(params_from_iter(params.iter()))?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(column_count);
        for i in 0..column_count {
            cells.push(decode(row.get_ref(i)?));
        }
        table.push_row(cells);
    }
    Ok(table)
}

#[async_trait]
impl DataStore for SqliteDataStore {
    async fn execute(&self, query: &QuerySpec) -> Result<ResultTable, StoreError> {
        let sql = query.to_sql();
        let db_path = self.db_path.clone();
        tracing::debug!(sql = %sql.sql, params = ?sql.params, "sqlite select");
        tokio::task::spawn_blocking(move || {
            let conn = Self::open(&db_path)?;
            run_select(&conn, &sql.sql, &sql.params)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}
