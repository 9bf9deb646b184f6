//! Dashboard server.
//!
//! Usage: `mycoboost-serve [CONFIG]`. Without an argument the config path is
//! taken from `MYCOBOOST_CONFIG`, and without that the defaults apply.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use mycoboost::config::AppConfig;
use mycoboost::serve::{serve, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::resolve(config_path.as_deref()).context("failed to load configuration")?;

    let state = AppState::load(&config)
        .with_context(|| format!("failed to load artifacts from {}", config.artifacts.dir.display()))?;
    let state = Arc::new(state);
    serve(state, &config.serve.listen_addr)
        .await
        .with_context(|| format!("server on {} failed", config.serve.listen_addr))?;

    Ok(())
}
