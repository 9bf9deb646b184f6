//! Per-class precision / recall / F1 report.

use serde::{Deserialize, Serialize};

/// Scores for one class (or one average row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    pub support: usize,
}

/// Per-class scores plus macro and support-weighted averages.
///
/// Undefined ratios (no predicted or no actual members) are reported as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// One entry per class, in label-index order.
    pub classes: Vec<(String, ClassScores)>,
    pub accuracy: f64,
    #[serde(rename = "macro avg")]
    pub macro_avg: ClassScores,
    #[serde(rename = "weighted avg")]
    pub weighted_avg: ClassScores,
}

impl ClassificationReport {
    /// Build a report from predicted and actual label indices.
    ///
    /// `labels[i]` names label index `i`. Indices outside `labels` are counted
    /// in accuracy but belong to no class row.
    pub fn compute(predicted: &[u32], actual: &[u32], labels: &[String]) -> Self {
        debug_assert_eq!(predicted.len(), actual.len());

        let classes: Vec<(String, ClassScores)> = labels
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let idx = idx as u32;
                let (mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize);
                for (&p, &a) in predicted.iter().zip(actual) {
                    match (p == idx, a == idx) {
                        (true, true) => tp += 1,
                        (true, false) => fp += 1,
                        (false, true) => fn_ += 1,
                        (false, false) => {}
                    }
                }
                let precision = ratio(tp, tp + fp);
                let recall = ratio(tp, tp + fn_);
                let f1_score = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                let scores = ClassScores {
                    precision,
                    recall,
                    f1_score,
                    support: tp + fn_,
                };
                (name.clone(), scores)
            })
            .collect();

        let accuracy = super::Accuracy::score_labels(predicted, actual);
        let total_support: usize = classes.iter().map(|(_, s)| s.support).sum();
        let n_classes = classes.len().max(1) as f64;

        let average = |weight: &dyn Fn(&ClassScores) -> f64, denom: f64| ClassScores {
            precision: classes.iter().map(|(_, s)| weight(s) * s.precision).sum::<f64>() / denom,
            recall: classes.iter().map(|(_, s)| weight(s) * s.recall).sum::<f64>() / denom,
            f1_score: classes.iter().map(|(_, s)| weight(s) * s.f1_score).sum::<f64>() / denom,
            support: total_support,
        };
        let macro_avg = average(&|_| 1.0, n_classes);
        let weighted_avg = average(&|s| s.support as f64, total_support.max(1) as f64);

        Self {
            classes,
            accuracy,
            macro_avg,
            weighted_avg,
        }
    }

    /// Scores of a class by label.
    pub fn class(&self, label: &str) -> Option<&ClassScores> {
        self.classes.iter().find(|(name, _)| name == label).map(|(_, s)| s)
    }

    /// Copy with every score rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        let round = |s: &ClassScores| ClassScores {
            precision: round_to(s.precision, decimals),
            recall: round_to(s.recall, decimals),
            f1_score: round_to(s.f1_score, decimals),
            support: s.support,
        };
        Self {
            classes: self.classes.iter().map(|(n, s)| (n.clone(), round(s))).collect(),
            accuracy: round_to(self.accuracy, decimals),
            macro_avg: round(&self.macro_avg),
            weighted_avg: round(&self.weighted_avg),
        }
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn labels() -> Vec<String> {
        vec!["e".into(), "p".into()]
    }

    #[test]
    fn per_class_scores() {
        // actual:    e e e p p
        // predicted: e e p p e
        let report = ClassificationReport::compute(&[0, 0, 1, 1, 0], &[0, 0, 0, 1, 1], &labels());

        let e = report.class("e").unwrap();
        assert_abs_diff_eq!(e.precision, 2.0 / 3.0);
        assert_abs_diff_eq!(e.recall, 2.0 / 3.0);
        assert_eq!(e.support, 3);

        let p = report.class("p").unwrap();
        assert_abs_diff_eq!(p.precision, 0.5);
        assert_abs_diff_eq!(p.recall, 0.5);
        assert_eq!(p.support, 2);

        assert_abs_diff_eq!(report.accuracy, 0.6);
        assert_abs_diff_eq!(report.macro_avg.recall, (2.0 / 3.0 + 0.5) / 2.0);
        assert_abs_diff_eq!(report.weighted_avg.recall, 0.6);
        assert_eq!(report.weighted_avg.support, 5);
    }

    #[test]
    fn never_predicted_class_scores_zero() {
        let report = ClassificationReport::compute(&[0, 0], &[0, 1], &labels());
        let p = report.class("p").unwrap();
        assert_eq!(p.precision, 0.0);
        assert_eq!(p.f1_score, 0.0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(1.0, 4), 1.0);
        let report = ClassificationReport::compute(&[0, 0, 1], &[0, 1, 1], &labels()).rounded(4);
        assert_eq!(report.class("e").unwrap().precision, 0.5);
        assert_eq!(report.accuracy, 0.6667);
    }
}
