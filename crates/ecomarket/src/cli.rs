//! Argument parsing and the single-query run.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ecomarket_config::{Settings, SettingsOverrides};
use ecomarket_core::{CompletionProvider, DatabaseFile, Dispatcher, Mode, RecordStore};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// EcoMarket customer-service assistant backed by a local chat model.
#[derive(Debug, Parser)]
#[command(name = "ecomarket", version)]
pub struct Cli {
    /// Path to the JSON database of orders and products
    pub file_path: PathBuf,
    /// The customer query
    pub user_query: String,
    /// tracking (order status), return (product returns), or auto (classify first)
    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    pub mode: ModeArg,
    /// Settings file (defaults to ./settings.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the model name from settings
    #[arg(long)]
    pub model: Option<String>,
    /// Override the chat-completions base URL from settings
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Tracking,
    Return,
    Auto,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Tracking => Mode::Tracking,
            ModeArg::Return => Mode::Return,
            ModeArg::Auto => Mode::Auto,
        }
    }
}

impl Cli {
    /// Load settings from `--config` or `<cwd>/settings.toml`, then apply overrides.
    pub fn load_settings(&self, cwd: &Path) -> anyhow::Result<Settings> {
        let settings = match self.config.as_ref() {
            Some(path) => Settings::load_from_path(path),
            None => Settings::load_default(cwd),
        }
        .context("failed to load settings")?;

        settings
            .with_overrides(SettingsOverrides {
                model: self.model.clone(),
                base_url: self.base_url.clone(),
            })
            .context("invalid settings override")
    }
}

/// Answer one query and return the text to print.
///
/// Input problems (missing or empty database, empty query) come back as a
/// warning line rather than an error.
pub async fn answer(
    cli: &Cli,
    settings: &Settings,
    provider: Arc<dyn CompletionProvider>,
) -> String {
    let database = match DatabaseFile::read(&cli.file_path) {
        Ok(database) => database,
        Err(warning) => return warning.to_string(),
    };
    let store = RecordStore::from_json_or_empty(&database.contents);
    info!(
        "answering query (mode={:?}, records={}, database={})",
        cli.mode,
        store.len(),
        database.path.display()
    );

    Dispatcher::new(settings, provider)
        .dispatch(cli.mode.into(), &cli.user_query, &store)
        .await
        .to_string()
}
