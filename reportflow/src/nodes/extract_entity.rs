//! Entity extraction node: which client, product or region the report is about.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::state::{EntityFilter, ReportState};

use super::prompts::extract_entity_instruction;

/// Writes `entity_filter`; never empty (blank replies become `All`).
pub struct ExtractEntityNode {
    llm: Arc<dyn LlmClient>,
}

impl ExtractEntityNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ReportState> for ExtractEntityNode {
    fn id(&self) -> &str {
        super::EXTRACT_ENTITY
    }

    async fn run(&self, mut state: ReportState) -> Result<(ReportState, Next), AgentError> {
        let reply = self
            .llm
            .complete(&extract_entity_instruction(), &state.request_text)
            .await?;
        let entity = EntityFilter::from_response(&reply);
        tracing::info!(entity = %entity, "entity extracted");
        state.entity_filter = Some(entity);
        Ok((state, Next::Continue))
    }
}
