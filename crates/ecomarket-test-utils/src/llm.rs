use async_trait::async_trait;
use ecomarket_core::{CompletionError, CompletionProvider, CompletionRequest};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// One queued outcome for [`ScriptedProvider`].
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    /// Fails with an HTTP 503 status error.
    Failure,
}

impl ScriptedReply {
    pub fn text(text: impl Into<String>) -> Self {
        ScriptedReply::Text(text.into())
    }
}

/// Replays queued replies in order and records every request.
///
/// Once the queue is drained, further calls fail with `EmptyResponse`.
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue plain text replies.
    pub fn replying<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(ScriptedReply::text))
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().push(request.clone());
        match self.replies.lock().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure) => Err(unavailable()),
            None => Err(CompletionError::EmptyResponse),
        }
    }
}

/// Fails every call and counts attempts.
#[derive(Debug, Clone, Default)]
pub struct FailingProvider {
    calls: Arc<Mutex<usize>>,
}

impl FailingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        *self.calls.lock() += 1;
        Err(unavailable())
    }
}

fn unavailable() -> CompletionError {
    CompletionError::Status {
        status: 503,
        body: "model unavailable".to_string(),
    }
}
