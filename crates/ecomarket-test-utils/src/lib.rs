//! Test helpers shared across EcoMarket crates.

pub mod fixtures;
pub mod llm;

pub use fixtures::{SAMPLE_RECORDS_JSON, SAMPLE_SETTINGS_TOML, extract_query, sample_settings};
pub use llm::{FailingProvider, ScriptedProvider, ScriptedReply};
