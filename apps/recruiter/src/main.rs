mod actions;
mod cli;
mod commands;
mod config;
mod embedding;
mod errors;
mod llm_client;
mod matching;
mod models;
mod parsing;
mod shortlist;
mod state;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first; malformed values abort before anything runs
    let mut config = Config::from_env()?;
    if let Some(data_dir) = cli.data_dir.clone() {
        config.data_dir = data_dir;
    }

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting recruiter v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {}", config.data_dir.display());

    let state = AppState::init(config).await?;

    if let Err(e) = commands::dispatch(&state, cli.command).await {
        error!(code = e.code(), "{e}");
        return Err(e.into());
    }
    Ok(())
}
