//! Chat-completion provider interface.
//!
//! Providers return a typed result. Fallback policy (default intent, error
//! banner) is decided by the dispatcher at each call site.

mod openai;

pub use openai::OpenAiClient;

use crate::prompt::Message;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Body of one chat-completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

/// Errors returned by completion providers.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body is not a chat-completion payload.
    #[error("failed to decode completion response: {0}")]
    Decode(String),
    /// The response has no choice with text content.
    #[error("completion response contained no message content")]
    EmptyResponse,
}

#[async_trait]
/// Chat-completion backend used by the dispatcher.
pub trait CompletionProvider: Send + Sync {
    /// Send the messages and return the text of the first choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
