//! Error types for settings loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file does not exist.
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Reading a settings file failed.
    #[error("failed to read settings: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing or decoding the TOML document failed.
    #[error("failed to parse settings: {0}")]
    ParseFailed(#[from] toml::de::Error),
    /// A specific field failed validation.
    #[error("invalid settings at {path}: {message}")]
    InvalidField { path: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(path: &str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
