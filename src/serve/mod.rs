//! The dashboard: an axum server over an immutable [`AppState`].
//!
//! | Route | View |
//! |---|---|
//! | `GET /`, `GET /predict` | inference form |
//! | `POST /predict` | form + classification |
//! | `GET /metrics` | accuracy, report, importance chart |
//! | `GET /dataset` | first rows of the dataset |
//! | `POST /api/predict` | JSON classification |
//! | `GET /health` | liveness + whether a model is loaded |
//!
//! Without an artifact set the model views answer 503 with instructions to
//! run the trainer; the dataset view and health check keep working.

pub mod chart;
mod handlers;
pub mod html;
pub mod views;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::artifacts::{load_artifacts, ArtifactError, ArtifactPaths, ArtifactSet};
use crate::config::AppConfig;

pub use handlers::PredictRequest;

/// State shared by every request. Never mutated after startup.
#[derive(Debug)]
pub struct AppState {
    pub artifacts: Option<ArtifactSet>,
    pub dataset_path: PathBuf,
    pub preview_rows: usize,
    pub top_features: usize,
}

impl AppState {
    pub fn new(config: &AppConfig, artifacts: Option<ArtifactSet>) -> Self {
        Self {
            artifacts,
            dataset_path: config.data.preview.clone(),
            preview_rows: config.serve.preview_rows,
            top_features: config.serve.top_features,
        }
    }

    /// Load the artifact set named by `config` and build the state.
    ///
    /// A missing set is not an error: the dashboard starts with the model
    /// views disabled.
    pub fn load(config: &AppConfig) -> Result<Self, ArtifactError> {
        let artifacts = load_artifacts(&ArtifactPaths::in_dir(&config.artifacts.dir))?;
        if artifacts.is_none() {
            tracing::warn!(
                dir = %config.artifacts.dir.display(),
                "no trained model found, run mycoboost-train first; model views are disabled"
            );
        }
        Ok(Self::new(config, artifacts))
    }
}

/// Build the axum [`Router`] with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::predict_form))
        .route("/predict", get(handlers::predict_form).post(handlers::predict_submit))
        .route("/metrics", get(handlers::metrics))
        .route("/dataset", get(handlers::dataset))
        .route("/api/predict", post(handlers::api_predict))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Bind `listen_addr` and serve until the process exits.
pub async fn serve(state: Arc<AppState>, listen_addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, model_loaded = state.artifacts.is_some(), "dashboard listening");
    axum::serve(listener, build_router(state)).await
}
