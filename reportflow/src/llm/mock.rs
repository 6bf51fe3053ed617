//! Mock LLM for tests and examples.
//!
//! Returns either one fixed reply for every call or a script of replies in call
//! order. Every request is recorded so tests can assert which nodes reached the model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

enum Replies {
    Fixed(String),
    Script(Vec<String>),
    Fail(String),
}

/// Mock LLM: fixed or scripted replies, with call recording.
///
/// - [`MockLlm::new`]: same content for every call.
/// - [`MockLlm::scripted`]: n-th call returns the n-th reply; calls past the end
///   fail with [`AgentError::Llm`], which is how tests simulate a model outage mid-run.
/// - [`MockLlm::failing`]: every call fails.
///
/// **Interaction**: Implements `LlmClient`; used by node and workflow tests.
pub struct MockLlm {
    replies: Replies,
    call_count: AtomicUsize,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Mock that returns `content` for every call.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_replies(Replies::Fixed(content.into()))
    }

    /// Mock that returns `replies` in call order, then fails.
    pub fn scripted<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_replies(Replies::Script(replies.into_iter().map(Into::into).collect()))
    }

    /// Mock whose every call fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_replies(Replies::Fail(reason.into()))
    }

    fn with_replies(replies: Replies) -> Self {
        Self {
            replies,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of `invoke` calls so far (including failed ones).
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Messages of every call so far, in call order.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(messages.to_vec());
        }
        let content = match &self.replies {
            Replies::Fixed(content) => content.clone(),
            Replies::Script(script) => script.get(n).cloned().ok_or_else(|| {
                AgentError::Llm(format!("mock script exhausted after {} calls", script.len()))
            })?,
            Replies::Fail(reason) => return Err(AgentError::Llm(reason.clone())),
        };
        Ok(LlmResponse {
            content,
            usage: None,
        })
    }
}
