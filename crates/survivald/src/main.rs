//! Survival Daemon - relay and form server for the survival scorer
//!
//! Serves the prediction form and forwards score requests to the external
//! scorer with the configured bearer token.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use survival_common::Config;
use survivald::relay::ScorerClient;
use survivald::server::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "survivald")]
#[command(about = "Survival score relay and prediction form server", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to /etc/survival/config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file and SURVIVAL_BIND
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Survival Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    config.scorer_token()?;

    let scorer = ScorerClient::from_config(&config.scorer)
        .context("Failed to set up scorer client")?;
    server::run(AppState::new(scorer), &config.server.bind).await
}
