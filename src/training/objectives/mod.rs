//! Objective (loss) functions for gradient boosting.
//!
//! An objective turns current raw scores into per-sample gradients and
//! hessians, supplies the initial score, and maps raw scores to the output
//! space (probabilities for classification).

mod classification;

pub use classification::LogisticLoss;

use crate::model::TaskKind;
use crate::training::GradsTuple;

/// A twice-differentiable loss.
pub trait ObjectiveFn {
    /// Fill `grad_hess[i]` from `predictions[i]` (raw score) and `targets[i]`.
    fn compute_gradients(&self, predictions: &[f32], targets: &[f32], grad_hess: &mut [GradsTuple]);

    /// Constant raw score minimizing the loss over `targets`.
    fn compute_base_score(&self, targets: &[f32]) -> f32;

    /// Map a raw score to the output space.
    fn transform(&self, raw: f32) -> f32;

    fn name(&self) -> &'static str;

    fn task_kind(&self) -> TaskKind;
}
