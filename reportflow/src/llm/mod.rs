//! Language-model client abstraction.
//!
//! The classification, entity-extraction and report-drafting nodes depend on a
//! callable that turns one system instruction (plus optional user text) into
//! assistant text. This module defines the trait, a scripted mock and the
//! OpenAI-compatible client.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from an LLM completion.
#[derive(Clone, Debug)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
    /// Token usage for this call, when the provider reports it.
    pub usage: Option<LlmUsage>,
}

/// LLM client: given messages, returns assistant text.
///
/// Calls are stateless; callers send the whole exchange each time. Failures are
/// opaque and surface as [`AgentError::Llm`]. Implementations must be safe to
/// share between concurrent runs.
///
/// **Interaction**: Used by `ClassifyNode`, `ExtractEntityNode` and `DraftReportNode`
/// through [`LlmClient::complete`].
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn with the given messages.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;

    /// One exchange: system instruction plus user text, returns the reply text.
    ///
    /// An empty `user_text` sends the system instruction alone.
    async fn complete(&self, system_instruction: &str, user_text: &str) -> Result<String, AgentError> {
        let mut messages = vec![Message::system(system_instruction)];
        if !user_text.is_empty() {
            messages.push(Message::user(user_text));
        }
        let response = self.invoke(&messages).await?;
        Ok(response.content)
    }
}
