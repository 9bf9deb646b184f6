//! Axum handlers. Each one reads the shared state, calls a view and picks a
//! status code.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use super::html::{self, Nav};
use super::views::{self, FormValues, Prediction};
use super::AppState;

type HtmlResponse = (StatusCode, Html<String>);

fn no_model(nav: Nav) -> HtmlResponse {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Html(html::page("No model", nav, &html::guidance())),
    )
}

/// `GET /` and `GET /predict`: the form with every input at 0.
pub async fn predict_form(State(state): State<Arc<AppState>>) -> HtmlResponse {
    let Some(set) = &state.artifacts else {
        return no_model(Nav::Predict);
    };
    let inputs = FormValues::zeros(set.feature_names.len()).to_inputs();
    let body = views::render_inference(set, &inputs, None);
    (StatusCode::OK, Html(html::page("Inference", Nav::Predict, &body)))
}

/// `POST /predict`: classify the submitted form.
pub async fn predict_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> HtmlResponse {
    let Some(set) = &state.artifacts else {
        return no_model(Nav::Predict);
    };

    let outcome = views::parse_form(&set.feature_names, &form).and_then(|values| views::classify(set, &values));
    let status = match &outcome {
        Ok(prediction) => {
            tracing::debug!(label = prediction.label_index, verdict = ?prediction.verdict, "prediction");
            StatusCode::OK
        }
        Err(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };

    // the form keeps what was typed, valid or not
    let inputs = views::submitted_inputs(&set.feature_names, &form);
    let body = views::render_inference(set, &inputs, Some(&outcome));
    (status, Html(html::page("Inference", Nav::Predict, &body)))
}

/// `GET /metrics`.
pub async fn metrics(State(state): State<Arc<AppState>>) -> HtmlResponse {
    let Some(set) = &state.artifacts else {
        return no_model(Nav::Metrics);
    };
    let body = views::render_report(set, state.top_features);
    (StatusCode::OK, Html(html::page("Metrics", Nav::Metrics, &body)))
}

/// `GET /dataset`. A missing file only affects this view.
pub async fn dataset(State(state): State<Arc<AppState>>) -> HtmlResponse {
    let outcome = views::preview(&state.dataset_path, state.preview_rows);
    if let Err(err) = &outcome {
        tracing::warn!(path = %state.dataset_path.display(), error = %err, "dataset preview unavailable");
    }
    let body = views::render_dataset(&state.dataset_path, &outcome);
    (StatusCode::OK, Html(html::page("Dataset", Nav::Dataset, &body)))
}

/// Body of `POST /api/predict`.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub features: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn json_error(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

/// `POST /api/predict`: JSON in, [`Prediction`] out.
pub async fn api_predict(State(state): State<Arc<AppState>>, Json(request): Json<PredictRequest>) -> Response {
    let Some(set) = &state.artifacts else {
        return json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "no trained model loaded; run mycoboost-train first".to_owned(),
        );
    };

    let result = views::order_features(&set.feature_names, &request.features).and_then(|values| views::classify(set, &values));
    match result {
        Ok(prediction) => (StatusCode::OK, Json::<Prediction>(prediction)).into_response(),
        Err(err) => json_error(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
    }
}

/// `GET /health`.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "model_loaded": state.artifacts.is_some(),
    }))
}
