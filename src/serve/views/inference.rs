//! Inference view: one integer input per feature, one prediction per submit.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use serde::Serialize;

use crate::artifacts::ArtifactSet;
use crate::model::{Classifier, FeatureVector, LabelIndex, PredictError};
use crate::serve::html::{display_name, error_box, escape};

/// Label string of the edible class in the encoder vocabulary.
const EDIBLE_LABEL: &str = "e";
/// Edible label index when the model carries no label vocabulary.
const EDIBLE_SENTINEL: LabelIndex = 0;

/// Errors turning user input into a prediction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("value '{value}' for '{feature}' is not an integer")]
    NotAnInteger { feature: String, value: String },

    #[error("unknown feature '{0}'")]
    UnknownFeature(String),

    #[error(transparent)]
    Rejected(#[from] PredictError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Edible,
    Poisonous,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edible => "Edible",
            Self::Poisonous => "Poisonous",
        }
    }
}

/// A single classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label_index: LabelIndex,
    /// Class label string, if the model knows its label vocabulary.
    pub label: Option<String>,
    pub verdict: Verdict,
    /// Probability of label index 1.
    pub probability: f32,
}

/// Encoded inputs in model feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub values: Vec<i64>,
}

impl FormValues {
    pub fn zeros(n_features: usize) -> Self {
        Self {
            values: vec![0; n_features],
        }
    }

    pub fn to_feature_vector(&self) -> FeatureVector {
        FeatureVector::new(self.values.iter().map(|&v| v as f32).collect())
    }

    /// Input field text for each value.
    pub fn to_inputs(&self) -> Vec<String> {
        self.values.iter().map(i64::to_string).collect()
    }
}

/// The submitted text of each feature field, in model feature order.
///
/// Missing or blank fields read as `0`, matching [`parse_form`].
pub fn submitted_inputs(feature_names: &[String], form: &HashMap<String, String>) -> Vec<String> {
    feature_names
        .iter()
        .map(|name| match form.get(name).map(|v| v.trim()) {
            None | Some("") => "0".to_owned(),
            Some(raw) => raw.to_owned(),
        })
        .collect()
}

/// Read one integer per feature from form fields named after the features.
///
/// Missing or blank fields are 0; fields that match no feature are ignored.
pub fn parse_form(feature_names: &[String], form: &HashMap<String, String>) -> Result<FormValues, InferenceError> {
    let values = feature_names
        .iter()
        .map(|name| match form.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(0),
            Some(raw) => raw.parse::<i64>().map_err(|_| InferenceError::NotAnInteger {
                feature: name.clone(),
                value: raw.to_owned(),
            }),
        })
        .collect::<Result<_, _>>()?;
    Ok(FormValues { values })
}

/// Order a `name → index` map by the model's features.
///
/// Missing features are 0; names the model does not know are rejected.
pub fn order_features(feature_names: &[String], values: &BTreeMap<String, i64>) -> Result<FormValues, InferenceError> {
    if let Some(unknown) = values.keys().find(|k| !feature_names.contains(*k)) {
        return Err(InferenceError::UnknownFeature(unknown.clone()));
    }
    let values = feature_names
        .iter()
        .map(|name| values.get(name).copied().unwrap_or(0))
        .collect();
    Ok(FormValues { values })
}

/// Classify one encoded sample.
pub fn classify(set: &ArtifactSet, values: &FormValues) -> Result<Prediction, InferenceError> {
    let features = values.to_feature_vector();
    let model = &set.model;
    let probability = model.predict_proba(&features)?;
    let label_index = model.predict(&features)?;

    let meta = model.meta();
    let edible = meta.label_index(EDIBLE_LABEL).unwrap_or(EDIBLE_SENTINEL);
    let verdict = if label_index == edible {
        Verdict::Edible
    } else {
        Verdict::Poisonous
    };

    Ok(Prediction {
        label_index,
        label: meta.label_name(label_index).map(str::to_owned),
        verdict,
        probability,
    })
}

/// The input form, prefilled with `inputs`, followed by the outcome if any.
pub fn render_inference(set: &ArtifactSet, inputs: &[String], outcome: Option<&Result<Prediction, InferenceError>>) -> String {
    let meta = set.model.meta();
    let mut html = String::from(
        "<section class=\"inference\"><h2>Fungal Biomarkers</h2>\
         <p>Input label-encoded indices for each trait.</p>\
         <form method=\"post\" action=\"/predict\">",
    );

    for (i, name) in set.feature_names.iter().enumerate() {
        let value = inputs.get(i).map_or("0", String::as_str);
        let max = meta
            .vocabulary_size(i)
            .map(|n| format!(" min=\"0\" max=\"{}\"", n.saturating_sub(1)))
            .unwrap_or_default();
        let _ = write!(
            html,
            "<label>{label} <input type=\"number\" name=\"{name}\" value=\"{value}\" step=\"1\"{max}></label>",
            label = escape(&display_name(name)),
            name = escape(name),
            value = escape(value),
        );
    }
    html.push_str("<button type=\"submit\">Run Diagnostics</button></form></section>");

    match outcome {
        Some(Ok(prediction)) => html.push_str(&render_prediction(prediction)),
        Some(Err(err)) => html.push_str(&error_box(&err.to_string())),
        None => {}
    }
    html
}

fn render_prediction(prediction: &Prediction) -> String {
    let class = match prediction.verdict {
        Verdict::Edible => "result-card-success",
        Verdict::Poisonous => "result-card-danger",
    };
    let label = prediction
        .label
        .clone()
        .unwrap_or_else(|| prediction.label_index.to_string());
    format!(
        "<div class=\"{class}\"><div class=\"metric-text\">Classification: {verdict} (Class: {label})</div>\
         <p>P(class index 1) = {p:.4}</p></div>",
        verdict = prediction.verdict.as_str(),
        label = escape(&label),
        p = prediction.probability,
    )
}
