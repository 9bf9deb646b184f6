//! Binary classification metrics.

use super::MetricFn;

// =============================================================================
// Accuracy
// =============================================================================

/// Classification accuracy: proportion of correct predictions.
///
/// A probability at or above `threshold` predicts class 1.
#[derive(Debug, Clone, Copy)]
pub struct Accuracy {
    pub threshold: f32,
}

impl Default for Accuracy {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Accuracy {
    /// Fraction of positions where `predicted == actual`. Empty input is 0.
    pub fn score_labels(predicted: &[u32], actual: &[u32]) -> f64 {
        debug_assert_eq!(predicted.len(), actual.len());
        if actual.is_empty() {
            return 0.0;
        }
        let correct = predicted.iter().zip(actual).filter(|(p, a)| p == a).count();
        correct as f64 / actual.len() as f64
    }
}

impl MetricFn for Accuracy {
    fn compute(&self, probabilities: &[f32], targets: &[f32]) -> f64 {
        debug_assert_eq!(probabilities.len(), targets.len());
        if targets.is_empty() {
            return 0.0;
        }
        let correct = probabilities
            .iter()
            .zip(targets)
            .filter(|(&p, &t)| {
                let pred_class = if p >= self.threshold { 1.0 } else { 0.0 };
                (pred_class - t).abs() < 0.5
            })
            .count();
        correct as f64 / targets.len() as f64
    }

    fn name(&self) -> &'static str {
        "accuracy"
    }
}

// =============================================================================
// LogLoss
// =============================================================================

/// Mean binary cross-entropy. Probabilities are clipped to `[1e-15, 1 - 1e-15]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLoss;

impl MetricFn for LogLoss {
    fn compute(&self, probabilities: &[f32], targets: &[f32]) -> f64 {
        debug_assert_eq!(probabilities.len(), targets.len());
        if targets.is_empty() {
            return 0.0;
        }
        const EPS: f64 = 1e-15;
        let total: f64 = probabilities
            .iter()
            .zip(targets)
            .map(|(&p, &t)| {
                let p = (p as f64).clamp(EPS, 1.0 - EPS);
                let t = t as f64;
                -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
            })
            .sum();
        total / targets.len() as f64
    }

    fn name(&self) -> &'static str {
        "logloss"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn accuracy_thresholds_probabilities() {
        let probs = [0.9, 0.2, 0.5, 0.49];
        let targets = [1.0, 0.0, 1.0, 1.0];
        assert_abs_diff_eq!(Accuracy::default().compute(&probs, &targets), 0.75);
    }

    #[test]
    fn accuracy_on_labels_is_bounded() {
        assert_abs_diff_eq!(Accuracy::score_labels(&[0, 1, 1], &[0, 1, 1]), 1.0);
        assert_abs_diff_eq!(Accuracy::score_labels(&[1, 0], &[0, 1]), 0.0);
        assert_abs_diff_eq!(Accuracy::score_labels(&[], &[]), 0.0);
    }

    #[test]
    fn logloss_of_uniform_prediction() {
        let value = LogLoss.compute(&[0.5, 0.5], &[0.0, 1.0]);
        assert_abs_diff_eq!(value, std::f64::consts::LN_2, epsilon = 1e-9);
    }

    #[test]
    fn logloss_is_finite_for_certain_mistakes() {
        assert!(LogLoss.compute(&[1.0], &[0.0]).is_finite());
    }
}
