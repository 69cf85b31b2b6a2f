//! Entry point for the EcoMarket assistant CLI.

use anyhow::Context;
use clap::Parser;
use ecomarket::cli::{self, Cli};
use ecomarket::logging;
use ecomarket_core::{CompletionProvider, OpenAiClient};
use log::{info, warn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let settings = cli.load_settings(&cwd)?;
    logging::init(&settings.logging).context("failed to open log file")?;
    for warning in settings.template_warnings() {
        warn!("{warning}");
    }
    info!(
        "starting assistant (mode={:?}, model={}, base_url={})",
        cli.mode, settings.general.model, settings.general.base_url
    );

    let client = OpenAiClient::from_settings(&settings.general)
        .context("failed to build completion client")?;
    let provider: Arc<dyn CompletionProvider> = Arc::new(client);

    let output = cli::answer(&cli, &settings, provider).await;
    println!("{output}");
    Ok(())
}
