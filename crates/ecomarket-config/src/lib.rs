//! Settings models and TOML loading.
//!
//! This crate owns the EcoMarket settings schema, validation, and the runtime
//! overrides applied by the CLI before the assistant starts.

mod error;
mod loader;
mod model;

/// Public error type returned by settings loading and validation APIs.
pub use error::ConfigError;
/// Loader constants and CLI overrides.
pub use loader::{DEFAULT_SETTINGS_FILE, SettingsOverrides};
/// Settings schema models.
pub use model::*;
