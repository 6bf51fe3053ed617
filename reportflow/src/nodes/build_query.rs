//! Query builder node: entity filter to a parameterized [`QuerySpec`].

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::{EntityFilter, ReportState};
use crate::store::QuerySpec;
use crate::workflow::DataConfig;

/// Deterministic: the same entity filter always yields the same query.
pub struct BuildQueryNode {
    data: DataConfig,
}

impl BuildQueryNode {
    pub fn new(data: DataConfig) -> Self {
        Self { data }
    }

    pub fn build(&self, entity: &EntityFilter) -> QuerySpec {
        QuerySpec::for_entity(&self.data.table, &self.data.match_columns, entity)
    }
}

#[async_trait]
impl Node<ReportState> for BuildQueryNode {
    fn id(&self) -> &str {
        super::BUILD_QUERY
    }

    async fn run(&self, mut state: ReportState) -> Result<(ReportState, Next), AgentError> {
        let entity = state.entity_filter.clone().unwrap_or(EntityFilter::All);
        let query = self.build(&entity);
        tracing::debug!(sql = %query.to_sql().sql, "query built");
        state.query_spec = Some(query);
        Ok((state, Next::Continue))
    }
}
