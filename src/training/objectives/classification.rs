//! Classification objectives.

use super::ObjectiveFn;
use crate::model::TaskKind;
use crate::training::GradsTuple;

/// Binary cross-entropy on log-odds scores. Targets are `0.0` or `1.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticLoss;

impl LogisticLoss {
    #[inline]
    pub fn sigmoid(x: f32) -> f32 {
        1.0 / (1.0 + (-x).exp())
    }
}

impl ObjectiveFn for LogisticLoss {
    fn compute_gradients(&self, predictions: &[f32], targets: &[f32], grad_hess: &mut [GradsTuple]) {
        debug_assert_eq!(predictions.len(), targets.len());
        debug_assert_eq!(predictions.len(), grad_hess.len());

        const HESS_MIN: f32 = 1e-6;

        for ((pair, &pred), &target) in grad_hess.iter_mut().zip(predictions).zip(targets) {
            let p = Self::sigmoid(pred);
            pair.grad = p - target;
            pair.hess = (p * (1.0 - p)).max(HESS_MIN);
        }
    }

    fn compute_base_score(&self, targets: &[f32]) -> f32 {
        if targets.is_empty() {
            return 0.0;
        }
        let pos: f64 = targets.iter().map(|&t| t as f64).sum();
        // Convert to log-odds
        let p = (pos / targets.len() as f64).clamp(1e-7, 1.0 - 1e-7);
        (p / (1.0 - p)).ln() as f32
    }

    #[inline]
    fn transform(&self, raw: f32) -> f32 {
        Self::sigmoid(raw)
    }

    fn name(&self) -> &'static str {
        "logistic"
    }

    fn task_kind(&self) -> TaskKind {
        TaskKind::BinaryClassification
    }
}
