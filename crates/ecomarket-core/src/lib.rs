//! Core assistant flow for EcoMarket.
//!
//! This crate owns the record store, the relevance matcher, prompt assembly,
//! the chat-completion client, and the intent dispatcher that wires them
//! together for a single query.

pub mod completion;
pub mod dispatcher;
pub mod error;
pub mod input;
pub mod intent;
pub mod matcher;
pub mod prompt;
pub mod records;

pub use completion::{CompletionError, CompletionProvider, CompletionRequest, OpenAiClient};
pub use dispatcher::{Answer, DispatchOutcome, Dispatcher, ResponseSource};
pub use error::CoreError;
pub use input::{DatabaseFile, InputWarning};
pub use intent::{Intent, Mode};
pub use matcher::RelevanceMatcher;
pub use prompt::{Message, PromptBuilder, PromptKind, Role};
pub use records::{Record, RecordStore};
