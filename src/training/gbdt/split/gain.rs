//! Second-order gain and leaf weight computation.

use crate::model::gbdt::RegularizationParams;

/// Gradient statistics of a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStats {
    pub grad: f64,
    pub hess: f64,
    pub count: u32,
}

impl NodeStats {
    /// Statistics of `self` with the rows of `other` removed.
    #[inline]
    pub fn minus(self, other: NodeStats) -> NodeStats {
        NodeStats {
            grad: self.grad - other.grad,
            hess: self.hess - other.hess,
            count: self.count - other.count,
        }
    }
}

/// Regularization used when scoring splits and leaves.
#[derive(Clone, Debug)]
pub struct GainParams {
    /// L2 penalty on leaf weights (lambda).
    pub reg_lambda: f32,
    /// L1 penalty on leaf weights (alpha).
    pub reg_alpha: f32,
    /// Gain a split must exceed (gamma).
    pub min_gain: f32,
    /// Minimum hessian sum per child.
    pub min_child_weight: f32,
    /// Minimum rows per child.
    pub min_samples_leaf: u32,
}

impl Default for GainParams {
    fn default() -> Self {
        Self::from(&RegularizationParams::default())
    }
}

impl From<&RegularizationParams> for GainParams {
    fn from(reg: &RegularizationParams) -> Self {
        Self {
            reg_lambda: reg.lambda,
            reg_alpha: reg.alpha,
            min_gain: reg.min_gain,
            min_child_weight: reg.min_child_weight,
            min_samples_leaf: reg.min_samples_leaf,
        }
    }
}

impl GainParams {
    /// Gradient sum after L1 soft thresholding.
    #[inline]
    fn thresholded(&self, grad: f64) -> f64 {
        let alpha = self.reg_alpha as f64;
        if grad > alpha {
            grad - alpha
        } else if grad < -alpha {
            grad + alpha
        } else {
            0.0
        }
    }

    /// Structure score `T(G)^2 / (H + lambda)` of a node.
    #[inline]
    fn score(&self, stats: NodeStats) -> f64 {
        let g = self.thresholded(stats.grad);
        g * g / (stats.hess + self.reg_lambda as f64)
    }

    /// Loss reduction of splitting `parent` into `left` and `right`.
    ///
    /// ```text
    /// gain = 0.5 * [S(L) + S(R) - S(P)] - gamma
    /// ```
    #[inline]
    pub fn split_gain(&self, left: NodeStats, right: NodeStats, parent: NodeStats) -> f32 {
        let gain = 0.5 * (self.score(left) + self.score(right) - self.score(parent));
        (gain - self.min_gain as f64) as f32
    }

    /// Whether both children satisfy the hessian and row-count minimums.
    #[inline]
    pub fn admits(&self, left: NodeStats, right: NodeStats) -> bool {
        let min_weight = self.min_child_weight as f64;
        left.hess >= min_weight
            && right.hess >= min_weight
            && left.count >= self.min_samples_leaf
            && right.count >= self.min_samples_leaf
    }

    /// Newton step `-T(G) / (H + lambda)` for a leaf.
    #[inline]
    pub fn leaf_weight(&self, stats: NodeStats) -> f32 {
        (-self.thresholded(stats.grad) / (stats.hess + self.reg_lambda as f64)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn stats(grad: f64, hess: f64, count: u32) -> NodeStats {
        NodeStats { grad, hess, count }
    }

    #[test]
    fn symmetric_split_gain() {
        let params = GainParams::default();
        let gain = params.split_gain(stats(10.0, 5.0, 5), stats(-10.0, 5.0, 5), stats(0.0, 10.0, 10));
        // 0.5 * (100/6 + 100/6 - 0)
        assert_abs_diff_eq!(gain, 100.0 / 6.0, epsilon = 1e-4);
    }

    #[test]
    fn gamma_is_subtracted() {
        let params = GainParams {
            min_gain: 1.0,
            ..Default::default()
        };
        let gain = params.split_gain(stats(10.0, 5.0, 5), stats(-10.0, 5.0, 5), stats(0.0, 10.0, 10));
        assert_abs_diff_eq!(gain, 100.0 / 6.0 - 1.0, epsilon = 1e-4);
    }

    #[test]
    fn child_constraints() {
        let params = GainParams {
            min_child_weight: 5.0,
            min_samples_leaf: 10,
            ..Default::default()
        };
        assert!(params.admits(stats(0.0, 5.0, 10), stats(0.0, 5.0, 10)));
        assert!(!params.admits(stats(0.0, 4.0, 10), stats(0.0, 5.0, 10)));
        assert!(!params.admits(stats(0.0, 5.0, 9), stats(0.0, 5.0, 10)));
    }

    #[test]
    fn leaf_weight_without_l1() {
        let params = GainParams::default();
        // 10 / (5 + 1)
        assert_abs_diff_eq!(params.leaf_weight(stats(-10.0, 5.0, 1)), 10.0 / 6.0, epsilon = 1e-6);
    }

    #[test]
    fn leaf_weight_with_l1() {
        let params = GainParams {
            reg_alpha: 2.0,
            ..Default::default()
        };
        assert_eq!(params.leaf_weight(stats(-1.0, 5.0, 1)), 0.0);
        // (10 - 2) / (5 + 1)
        assert_abs_diff_eq!(params.leaf_weight(stats(-10.0, 5.0, 1)), 8.0 / 6.0, epsilon = 1e-6);
    }

    #[test]
    fn minus_removes_rows() {
        let rest = stats(3.0, 2.0, 5).minus(stats(1.0, 0.5, 2));
        assert_eq!(rest, stats(2.0, 1.5, 3));
    }
}
