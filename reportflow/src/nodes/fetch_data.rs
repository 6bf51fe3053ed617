//! Data fetch node: run the query against the data store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::{ReportState, ResultTable};
use crate::store::DataStore;

/// Writes `result_table`. Store failures are logged and become an empty table;
/// the review step then flags the report.
pub struct FetchDataNode {
    store: Arc<dyn DataStore>,
}

impl FetchDataNode {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Node<ReportState> for FetchDataNode {
    fn id(&self) -> &str {
        super::FETCH_DATA
    }

    async fn run(&self, mut state: ReportState) -> Result<(ReportState, Next), AgentError> {
        let table = match &state.query_spec {
            Some(query) => match self.store.execute(query).await {
                Ok(table) => {
                    tracing::info!(rows = table.row_count(), "data fetched");
                    table
                }
                Err(e) => {
                    tracing::warn!(error = %e, table = %query.table, "data store query failed; continuing with no rows");
                    ResultTable::empty()
                }
            },
            None => {
                tracing::warn!("no query to run; continuing with no rows");
                ResultTable::empty()
            }
        };
        state.result_table = Some(table);
        Ok((state, Next::Continue))
    }
}
