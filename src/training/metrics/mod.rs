//! Evaluation metrics for model quality.
//!
//! Metrics are separate from loss functions: a model is trained with
//! [`LogisticLoss`](crate::training::LogisticLoss) but reported with
//! accuracy and a per-class breakdown.
//!
//! - [`Accuracy`]: fraction of correct labels at a probability threshold
//! - [`LogLoss`]: binary cross-entropy
//! - [`ClassificationReport`]: per-class precision, recall, F1 and support

mod classification;
mod report;

pub use classification::{Accuracy, LogLoss};
pub use report::{ClassScores, ClassificationReport};
pub(crate) use report::round_to;

/// A scalar metric over probabilities and `{0, 1}` targets.
pub trait MetricFn {
    /// Compute the metric. `probabilities` and `targets` are per sample.
    fn compute(&self, probabilities: &[f32], targets: &[f32]) -> f64;

    fn name(&self) -> &'static str;
}
