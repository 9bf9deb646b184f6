//! Feature importance from tree split statistics.

use serde::{Deserialize, Serialize};

use crate::repr::gbdt::Forest;

/// Errors computing feature importance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplainError {
    #[error("importance type '{0}' needs {1} statistics, the model has none")]
    MissingNodeStats(&'static str, &'static str),

    #[error("tree {tree} splits on feature {feature}, model has {n_features} features")]
    FeatureOutOfBounds {
        tree: usize,
        feature: u32,
        n_features: usize,
    },

    #[error("expected {expected} feature names, got {got}")]
    NameCountMismatch { expected: usize, got: usize },
}

/// How a split contributes to its feature's importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceType {
    /// Number of splits.
    #[default]
    Split,
    /// Total split gain.
    Gain,
    /// Gain divided by split count.
    AverageGain,
    /// Total cover of split nodes.
    Cover,
    /// Cover divided by split count.
    AverageCover,
}

impl ImportanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Gain => "gain",
            Self::AverageGain => "average_gain",
            Self::Cover => "cover",
            Self::AverageCover => "average_cover",
        }
    }
}

/// One non-negative score per feature, in feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureImportance {
    values: Vec<f64>,
    names: Option<Vec<String>>,
    importance_type: ImportanceType,
}

impl FeatureImportance {
    pub fn new(values: Vec<f64>, names: Option<Vec<String>>, importance_type: ImportanceType) -> Self {
        Self {
            values,
            names,
            importance_type,
        }
    }

    /// Raw scores in feature order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn importance_type(&self) -> ImportanceType {
        self.importance_type
    }

    pub fn n_features(&self) -> usize {
        self.values.len()
    }

    /// Name of `feature`, `f{index}` when the model has no names.
    pub fn name(&self, feature: usize) -> String {
        match &self.names {
            Some(names) => names[feature].clone(),
            None => format!("f{feature}"),
        }
    }

    /// Scores scaled to sum to 1. All zeros stay zeros.
    pub fn normalized(&self) -> Vec<f64> {
        let total: f64 = self.values.iter().sum();
        if total > 0.0 {
            self.values.iter().map(|v| v / total).collect()
        } else {
            vec![0.0; self.values.len()]
        }
    }

    /// The `k` highest scoring features as `(index, score)`, descending.
    ///
    /// Ties keep feature order.
    pub fn top_k(&self, k: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.values.iter().copied().enumerate().collect();
        // stable: equal scores stay in feature order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    /// `(name, normalized score)` for every feature, in feature order.
    pub fn named_normalized(&self) -> Vec<(String, f64)> {
        self.normalized()
            .into_iter()
            .enumerate()
            .map(|(i, v)| (self.name(i), v))
            .collect()
    }
}

/// Accumulate per-feature importance over every split node of `forest`.
pub fn compute_forest_importance(
    forest: &Forest,
    n_features: usize,
    importance_type: ImportanceType,
    feature_names: Option<Vec<String>>,
) -> Result<FeatureImportance, ExplainError> {
    if let Some(names) = &feature_names {
        if names.len() != n_features {
            return Err(ExplainError::NameCountMismatch {
                expected: n_features,
                got: names.len(),
            });
        }
    }

    let mut counts = vec![0u32; n_features];
    let mut totals = vec![0.0f64; n_features];

    for (t, tree) in forest.trees().enumerate() {
        let stat = match importance_type {
            ImportanceType::Split => None,
            ImportanceType::Gain | ImportanceType::AverageGain => {
                Some(tree.gains().ok_or(ExplainError::MissingNodeStats(importance_type.as_str(), "gain"))?)
            }
            ImportanceType::Cover | ImportanceType::AverageCover => {
                Some(tree.covers().ok_or(ExplainError::MissingNodeStats(importance_type.as_str(), "cover"))?)
            }
        };

        for node in 0..tree.n_nodes() as u32 {
            if tree.is_leaf(node) {
                continue;
            }
            let feature = tree.split_index(node);
            let slot = feature as usize;
            if slot >= n_features {
                return Err(ExplainError::FeatureOutOfBounds {
                    tree: t,
                    feature,
                    n_features,
                });
            }
            counts[slot] += 1;
            totals[slot] += match stat {
                Some(values) => f64::from(values[node as usize]).max(0.0),
                None => 1.0,
            };
        }
    }

    let values = match importance_type {
        ImportanceType::AverageGain | ImportanceType::AverageCover => totals
            .iter()
            .zip(&counts)
            .map(|(&total, &n)| if n > 0 { total / f64::from(n) } else { 0.0 })
            .collect(),
        _ => totals,
    };

    Ok(FeatureImportance::new(values, feature_names, importance_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::gbdt::{MutableTree, Tree};
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    /// Root on feature 0 (gain 6), right child on feature 2 (gain 2).
    fn tree() -> Tree {
        let mut t = MutableTree::new();
        let root = t.init_root();
        let (l, r) = t.apply_split(root, 0, 0.5, 6.0);
        t.make_leaf(l, -1.0);
        let (rl, rr) = t.apply_split(r, 2, 1.5, 2.0);
        t.make_leaf(rl, 0.5);
        t.make_leaf(rr, 1.0);
        for (node, cover) in [(0, 8.0), (1, 3.0), (2, 5.0), (3, 2.0), (4, 3.0)] {
            t.set_cover(node, cover);
        }
        t.freeze()
    }

    fn forest(n_trees: usize) -> Forest {
        let mut forest = Forest::new(0.0);
        for _ in 0..n_trees {
            forest.push_tree(tree());
        }
        forest
    }

    #[rstest]
    #[case(ImportanceType::Split, [2.0, 0.0, 2.0])]
    #[case(ImportanceType::Gain, [12.0, 0.0, 4.0])]
    #[case(ImportanceType::AverageGain, [6.0, 0.0, 2.0])]
    #[case(ImportanceType::Cover, [16.0, 0.0, 10.0])]
    #[case(ImportanceType::AverageCover, [8.0, 0.0, 5.0])]
    fn importance_types(#[case] kind: ImportanceType, #[case] expected: [f64; 3]) {
        let imp = compute_forest_importance(&forest(2), 3, kind, None).unwrap();
        assert_eq!(imp.values(), &expected);
        assert_eq!(imp.importance_type(), kind);
    }

    #[test]
    fn normalized_sums_to_one() {
        let imp = compute_forest_importance(&forest(1), 3, ImportanceType::Gain, None).unwrap();
        let norm = imp.normalized();
        assert_abs_diff_eq!(norm.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(norm[0], 0.75, epsilon = 1e-12);
        assert!(norm.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn empty_forest_normalizes_to_zeros() {
        let imp = compute_forest_importance(&Forest::new(0.0), 2, ImportanceType::Gain, None).unwrap();
        assert_eq!(imp.normalized(), vec![0.0, 0.0]);
    }

    #[test]
    fn top_k_is_descending_with_stable_ties() {
        let imp = FeatureImportance::new(vec![0.1, 0.5, 0.2, 0.5, 0.0], None, ImportanceType::Gain);
        assert_eq!(imp.top_k(3), vec![(1, 0.5), (3, 0.5), (2, 0.2)]);
        assert_eq!(imp.top_k(10).len(), 5);
    }

    #[test]
    fn names_fall_back_to_index() {
        let imp = FeatureImportance::new(vec![1.0, 3.0], Some(vec!["odor".into(), "habitat".into()]), ImportanceType::Split);
        assert_eq!(imp.name(1), "habitat");
        assert_eq!(imp.named_normalized(), vec![("odor".to_string(), 0.25), ("habitat".to_string(), 0.75)]);

        let unnamed = FeatureImportance::new(vec![1.0], None, ImportanceType::Split);
        assert_eq!(unnamed.name(0), "f0");
    }

    #[test]
    fn missing_stats_are_reported() {
        let mut forest = Forest::new(0.0);
        forest.push_tree(Tree::new(vec![0], vec![0.0], vec![0], vec![0], vec![true], vec![1.0]));
        let err = compute_forest_importance(&forest, 1, ImportanceType::Gain, None).unwrap_err();
        assert_eq!(err, ExplainError::MissingNodeStats("gain", "gain"));
        assert!(compute_forest_importance(&forest, 1, ImportanceType::Split, None).is_ok());
    }

    #[test]
    fn name_count_is_checked() {
        let err = compute_forest_importance(&forest(1), 3, ImportanceType::Split, Some(vec!["a".into()])).unwrap_err();
        assert_eq!(err, ExplainError::NameCountMismatch { expected: 3, got: 1 });
    }
}
