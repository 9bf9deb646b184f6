//! The metrics artifact.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::explainability::FeatureImportance;
use crate::training::{round_to, ClassificationReport};

/// Decimal places kept for every stored metric.
pub const METRIC_DECIMALS: i32 = 4;

/// Evaluation results of one training run.
///
/// Field names follow the on-disk JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    /// Held-out accuracy in `[0, 1]`.
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,

    #[serde(rename = "Model Type")]
    pub model_type: String,

    /// Normalized gain importance per feature name.
    pub feature_importance: BTreeMap<String, f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_report: Option<ClassificationReport>,
}

impl MetricsBundle {
    /// Bundle metrics, rounding everything to [`METRIC_DECIMALS`].
    pub fn new(
        accuracy: f64,
        model_type: impl Into<String>,
        importance: &FeatureImportance,
        report: Option<ClassificationReport>,
    ) -> Self {
        let feature_importance = importance
            .named_normalized()
            .into_iter()
            .map(|(name, value)| (name, round_to(value, METRIC_DECIMALS)))
            .collect();
        Self {
            accuracy: round_to(accuracy, METRIC_DECIMALS),
            model_type: model_type.into(),
            feature_importance,
            classification_report: report.map(|r| r.rounded(METRIC_DECIMALS)),
        }
    }

    /// The `n` most important features, descending.
    ///
    /// `feature_order` decides ties (earlier wins); names missing from the
    /// importance map score 0.
    pub fn top_features(&self, feature_order: &[String], n: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = feature_order
            .iter()
            .map(|name| (name.clone(), self.feature_importance.get(name).copied().unwrap_or(0.0)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
