//! Settings loader with validation and CLI overrides.
//!
//! Settings come from a single TOML document. There is no layering: a missing
//! file is fatal, and the only adjustments after loading are the explicit
//! overrides the CLI passes in. Nothing here logs: loading runs before the
//! logger is configured from these settings.

#[cfg(test)]
mod tests;

use crate::{ConfigError, Settings};
use std::fs;
use std::path::Path;

/// Default settings filename looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.toml";
/// Placeholder replaced with the user query in prompt templates.
const QUERY_PLACEHOLDER: &str = "{query}";
/// Accepted sampling temperature range.
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Runtime overrides applied on top of the loaded settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Replaces `general.model`.
    pub model: Option<String>,
    /// Replaces `general.base_url`.
    pub base_url: Option<String>,
}

impl SettingsOverrides {
    fn is_empty(&self) -> bool {
        self.model.is_none() && self.base_url.is_none()
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load settings from raw TOML contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `settings.toml` from the given working directory.
    pub fn load_default(cwd: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_from_path(cwd.as_ref().join(DEFAULT_SETTINGS_FILE))
    }

    /// Apply CLI overrides and re-validate.
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Result<Self, ConfigError> {
        if overrides.is_empty() {
            return Ok(self);
        }
        if let Some(model) = overrides.model {
            self.general.model = model;
        }
        if let Some(base_url) = overrides.base_url {
            self.general.base_url = base_url;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.model.trim().is_empty() {
            return Err(ConfigError::invalid("general.model", "must not be empty"));
        }
        if !self.general.base_url.starts_with("http://")
            && !self.general.base_url.starts_with("https://")
        {
            return Err(ConfigError::invalid(
                "general.base_url",
                format!("expected an http(s) URL, got `{}`", self.general.base_url),
            ));
        }

        let temperature = &self.general.temperature;
        for (path, value) in [
            ("general.temperature.tracking", temperature.tracking),
            ("general.temperature.return", temperature.returns),
            ("general.temperature.complex", temperature.complex),
        ] {
            if !TEMPERATURE_RANGE.contains(&value) {
                return Err(ConfigError::invalid(
                    path,
                    format!("{value} is outside 0.0..=2.0"),
                ));
            }
        }

        if self.retrieval.keyword_fields.is_empty() {
            return Err(ConfigError::invalid(
                "retrieval.keyword_fields",
                "at least one field is required",
            ));
        }
        if let Some(field) = self
            .retrieval
            .keyword_fields
            .iter()
            .find(|field| field.trim().is_empty())
        {
            return Err(ConfigError::invalid(
                "retrieval.keyword_fields",
                format!("field names must not be empty (got `{field}`)"),
            ));
        }

        Ok(())
    }

    /// Prompt templates that cannot embed the query, one message per template.
    ///
    /// Not a validation error; the caller logs these once logging is up.
    pub fn template_warnings(&self) -> Vec<String> {
        [
            (
                "prompts.classifier.classify_prompt",
                &self.prompts.classifier.classify_prompt,
            ),
            (
                "prompts.summary.summary_prompt",
                &self.prompts.summary.summary_prompt,
            ),
        ]
        .into_iter()
        .filter(|(_, template)| !template.contains(QUERY_PLACEHOLDER))
        .map(|(path, _)| {
            format!("{path} has no {QUERY_PLACEHOLDER} placeholder; the query will be omitted")
        })
        .collect()
    }
}
