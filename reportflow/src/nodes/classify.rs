//! Classify node: ask the model whether the request is a performance report.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::state::{ReportState, TaskKind};

use super::prompts::classify_instruction;

/// Writes `task_kind`. Any reply without the `PerformanceReport` label is `Other`.
pub struct ClassifyNode {
    llm: Arc<dyn LlmClient>,
}

impl ClassifyNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ReportState> for ClassifyNode {
    fn id(&self) -> &str {
        super::CLASSIFY
    }

    async fn run(&self, mut state: ReportState) -> Result<(ReportState, Next), AgentError> {
        let reply = self
            .llm
            .complete(&classify_instruction(), &state.request_text)
            .await?;
        let kind = TaskKind::from_response(&reply);
        tracing::info!(?kind, "request classified");
        state.task_kind = Some(kind);
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::message::Message;

    #[tokio::test]
    async fn labels_report_requests() {
        let llm = Arc::new(MockLlm::new("PerformanceReport"));
        let node = ClassifyNode::new(llm.clone());
        let (state, next) = node
            .run(ReportState::new("전체 매출 현황 보고서를 만들어주세요"))
            .await
            .unwrap();
        assert_eq!(state.task_kind, Some(TaskKind::PerformanceReport));
        assert_eq!(next, Next::Continue);
        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert!(matches!(&requests[0][0], Message::System(s) if s.contains("PerformanceReport")));
        assert_eq!(
            requests[0][1],
            Message::user("전체 매출 현황 보고서를 만들어주세요")
        );
    }

    #[tokio::test]
    async fn anything_else_is_other() {
        let node = ClassifyNode::new(Arc::new(MockLlm::new("I think this is weather")));
        let (state, _) = node.run(ReportState::new("오늘 날씨 어때?")).await.unwrap();
        assert_eq!(state.task_kind, Some(TaskKind::Other));
    }

    #[tokio::test]
    async fn llm_failure_propagates() {
        let node = ClassifyNode::new(Arc::new(MockLlm::failing("timeout")));
        let err = node.run(ReportState::new("x")).await.unwrap_err();
        assert!(matches!(err, AgentError::Llm(_)));
    }
}
