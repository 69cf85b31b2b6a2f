//! OpenAI-compatible chat-completion client.
//!
//! Targets a local inference server (Ollama by default). No retries and no
//! timeout beyond the transport defaults.

use super::{CompletionError, CompletionProvider, CompletionRequest};
use async_trait::async_trait;
use ecomarket_config::GeneralSettings;
use log::debug;
use reqwest::Client as HttpClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-style `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: HttpClient,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    /// Create a client for the configured endpoint.
    ///
    /// Does not check connectivity; that happens on the first request.
    pub fn from_settings(general: &GeneralSettings) -> Result<Self, CompletionError> {
        let endpoint = resolve_endpoint(&general.base_url);
        let http = HttpClient::builder()
            .build()
            .map_err(|source| CompletionError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        Ok(Self {
            http,
            endpoint,
            api_key: general.api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    /// The resolved chat-completions URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        debug!(
            "sending completion request (endpoint={}, model={}, messages={}, temperature={})",
            self.endpoint,
            request.model,
            request.messages.len(),
            request.temperature
        );

        let mut req = self.http.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let transport = |source: reqwest::Error| CompletionError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        };
        let resp = req.send().await.map_err(transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|err| CompletionError::Decode(err.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}

/// Resolve the chat completions endpoint from a base URL.
fn resolve_endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else if base.ends_with("/v1") {
        format!("{base}/chat/completions")
    } else {
        format!("{base}/v1/chat/completions")
    }
}
