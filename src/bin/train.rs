//! Batch training job.
//!
//! Reads the mushroom dataset, trains the gradient boosted classifier and
//! writes the model, feature list and metrics next to each other. Settings
//! come from the YAML file named by `MYCOBOOST_CONFIG`, or the defaults.

use anyhow::Context;
use mycoboost::config::AppConfig;
use mycoboost::pipeline::run_training;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::resolve(None).context("failed to load configuration")?;
    let summary = run_training(&config).context("training failed")?;

    let metrics = &summary.artifacts.metrics;
    info!(
        accuracy = metrics.accuracy,
        train_rows = summary.n_train,
        test_rows = summary.n_test,
        model = %summary.paths.model.display(),
        "training complete"
    );
    for (name, score) in summary.artifacts.top_features(5) {
        info!(feature = %name, importance = score, "top feature");
    }

    Ok(())
}
