//! Intent dispatch for a single query.
//!
//! `START -> {explicit mode | classification} -> {tracking | return | escalate} -> DONE`.
//! Every completion failure is recovered here: classification falls back to
//! `Complex`, generation failures become a marked error string.

use crate::completion::{CompletionError, CompletionProvider, CompletionRequest};
use crate::input::InputWarning;
use crate::intent::{Intent, Mode};
use crate::matcher::RelevanceMatcher;
use crate::prompt::{Message, PromptBuilder, PromptKind};
use crate::records::RecordStore;
use ecomarket_config::Settings;
use log::{error, info, warn};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Prefix for generation failures shown to the user.
pub const ERROR_PREFIX: &str = "❌";
/// Banner wrapped around escalation summaries.
pub const ESCALATION_BANNER: &str =
    "⚠️ Consulta compleja: esta consulta será escalada a un agente humano.";

/// How the response text was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    /// Text returned by the completion endpoint.
    Generated,
    /// No relevant record; canned reply without a generation call.
    NotFound,
    /// The generation call failed; the text is an error message.
    GenerationFailed,
}

/// Terminal result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Intent chosen by classification, when the mode was `auto`.
    pub classified_as: Option<Intent>,
    /// Flow that produced the response.
    pub intent: Intent,
    pub response: String,
    pub source: ResponseSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The query was rejected before any completion call.
    Rejected(InputWarning),
    Answered(Answer),
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchOutcome::Rejected(warning) => write!(f, "{warning}"),
            DispatchOutcome::Answered(answer) => {
                if let Some(intent) = answer.classified_as {
                    writeln!(f, "📋 Consulta clasificada como: {intent}")?;
                }
                write!(f, "\n=== 📋 Respuesta del asistente ===\n\n{}", answer.response)
            }
        }
    }
}

/// Wires matcher, prompt builder, and completion provider for one run.
pub struct Dispatcher<'a> {
    settings: &'a Settings,
    provider: Arc<dyn CompletionProvider>,
    matcher: RelevanceMatcher,
}

impl<'a> Dispatcher<'a> {
    pub fn new(settings: &'a Settings, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            settings,
            provider,
            matcher: RelevanceMatcher::from_settings(&settings.retrieval),
        }
    }

    /// Resolve the mode, run the matching flow, and return its outcome.
    pub async fn dispatch(&self, mode: Mode, query: &str, store: &RecordStore) -> DispatchOutcome {
        if query.trim().is_empty() {
            warn!("user query is empty");
            return DispatchOutcome::Rejected(InputWarning::EmptyQuery);
        }

        let (intent, classified_as) = match mode.explicit_intent() {
            Some(intent) => (intent, None),
            None => {
                let intent = self.classify(query).await;
                (intent, Some(intent))
            }
        };

        let (response, source) = match intent {
            Intent::Tracking | Intent::Return => {
                self.answer_from_record(intent, store, query).await
            }
            Intent::Complex => self.escalate(query).await,
        };

        DispatchOutcome::Answered(Answer {
            classified_as,
            intent,
            response,
            source,
        })
    }

    /// Classify the query; any failure or unknown label escalates.
    pub async fn classify(&self, query: &str) -> Intent {
        let messages = self.prompts().build_messages(PromptKind::Classify, query);
        match self.complete(messages, Intent::Complex).await {
            Ok(output) => {
                let intent = Intent::from_classification(&output);
                info!("classified query: '{query}' -> {} ({intent})", output.trim());
                intent
            }
            Err(err) => {
                error!("failed to classify query, escalating: {err}");
                Intent::Complex
            }
        }
    }

    async fn answer_from_record(
        &self,
        intent: Intent,
        store: &RecordStore,
        query: &str,
    ) -> (String, ResponseSource) {
        let started = Instant::now();
        let Some(record) = self.matcher.find_relevant(store, query) else {
            warn!("no relevant data found for query: '{query}'");
            return (not_found_message(intent), ResponseSource::NotFound);
        };

        let kind = if intent == Intent::Return {
            PromptKind::Return(record)
        } else {
            PromptKind::Tracking(record)
        };
        let messages = self.prompts().build_messages(kind, query);
        match self.complete(messages, intent).await {
            Ok(response) => {
                info!(
                    "{intent} query: '{query}', response: {response}, elapsed: {:.2}s",
                    started.elapsed().as_secs_f64()
                );
                (response, ResponseSource::Generated)
            }
            Err(err) => {
                error!("failed to generate {intent} response: {err}");
                (
                    format!("{ERROR_PREFIX} Error al generar respuesta: {err}"),
                    ResponseSource::GenerationFailed,
                )
            }
        }
    }

    async fn escalate(&self, query: &str) -> (String, ResponseSource) {
        let messages = self.prompts().build_messages(PromptKind::Summary, query);
        let (summary, source) = match self.complete(messages, Intent::Complex).await {
            Ok(summary) => {
                info!("summary generated for query: '{query}' -> {summary}");
                (summary, ResponseSource::Generated)
            }
            Err(err) => {
                error!("failed to generate summary: {err}");
                (
                    format!("{ERROR_PREFIX} Error al generar resumen: {err}"),
                    ResponseSource::GenerationFailed,
                )
            }
        };
        (format!("{ESCALATION_BANNER}\nResumen: {summary}"), source)
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature_for: Intent,
    ) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: self.settings.general.model.clone(),
            messages,
            temperature: self.temperature(temperature_for),
        };
        self.provider.complete(&request).await
    }

    fn temperature(&self, intent: Intent) -> f32 {
        let temperature = &self.settings.general.temperature;
        match intent {
            Intent::Tracking => temperature.tracking,
            Intent::Return => temperature.returns,
            Intent::Complex => temperature.complex,
        }
    }

    fn prompts(&self) -> PromptBuilder<'a> {
        PromptBuilder::new(&self.settings.prompts)
    }
}

/// Canned reply when no record matches; no generation call is made.
pub fn not_found_message(intent: Intent) -> String {
    let subject = match intent {
        Intent::Return => "ese producto",
        _ => "ese pedido",
    };
    format!(
        "Lo siento, no encontré información sobre {subject}. ¿Deseas que un agente te asista?"
    )
}
