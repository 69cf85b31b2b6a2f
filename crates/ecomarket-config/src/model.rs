//! Settings schema for the EcoMarket assistant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root settings loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub general: GeneralSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub retrieval: RetrievalSettings,
    pub prompts: PromptSettings,
}

/// Model endpoint and sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneralSettings {
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub temperature: TemperatureSettings,
}

/// Sampling temperature per intent.
///
/// Classification runs at the `complex` temperature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemperatureSettings {
    #[serde(default = "default_tracking_temperature")]
    pub tracking: f32,
    #[serde(default = "default_return_temperature", rename = "return")]
    pub returns: f32,
    #[serde(default = "default_complex_temperature")]
    pub complex: f32,
}

impl Default for TemperatureSettings {
    fn default() -> Self {
        Self {
            tracking: default_tracking_temperature(),
            returns: default_return_temperature(),
            complex: default_complex_temperature(),
        }
    }
}

/// Default local Ollama endpoint.
fn default_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

/// Ollama ignores the key but OpenAI-style clients expect one.
fn default_api_key() -> Option<String> {
    Some("ollama".to_string())
}

fn default_tracking_temperature() -> f32 {
    0.2
}

fn default_return_temperature() -> f32 {
    0.3
}

fn default_complex_temperature() -> f32 {
    0.5
}

/// Log target and verbosity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    /// File the log is appended to; stderr when unset.
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level names accepted in `logging.log_level`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Map to the `log` crate filter. `Critical` has no direct counterpart.
    pub fn as_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => log::LevelFilter::Error,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            other => Err(format!(
                "unknown log level `{other}` (expected DEBUG, INFO, WARNING, ERROR or CRITICAL)"
            )),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record fields scanned by the relevance matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RetrievalSettings {
    #[serde(default = "default_keyword_fields")]
    pub keyword_fields: Vec<String>,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            keyword_fields: default_keyword_fields(),
        }
    }
}

fn default_keyword_fields() -> Vec<String> {
    vec!["order_id".to_string(), "product".to_string()]
}

/// Prompt templates. `{query}` in the classifier and summary templates is
/// replaced with the user query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PromptSettings {
    pub role_prompt: String,
    pub instruction_prompt: String,
    #[serde(default)]
    pub positive_example: String,
    #[serde(default)]
    pub positive_reasoning: String,
    #[serde(default)]
    pub positive_output: String,
    #[serde(default)]
    pub negative_example: String,
    #[serde(default)]
    pub negative_reasoning: String,
    #[serde(default)]
    pub negative_output: String,
    pub rag: RagPrompts,
    pub classifier: ClassifierPrompts,
    pub summary: SummaryPrompts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RagPrompts {
    pub retrieval_prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClassifierPrompts {
    pub classify_prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SummaryPrompts {
    pub summary_prompt: String,
}
