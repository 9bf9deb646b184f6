//! Split search over per-node histograms.
//!
//! Features are category codes binned one bin per code, so a split at bin `b`
//! sends codes `0..=b` left and the rest right. The stored threshold is
//! `b + 0.5`, which reproduces the same partition on raw code values under the
//! tree's `value < threshold` rule.

mod gain;

pub use gain::{GainParams, NodeStats};

use super::histograms::NodeHistogram;

/// Best split found for a node.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInfo {
    /// Feature index.
    pub feature: u32,
    /// Last bin that goes left.
    pub bin: u32,
    /// Raw-value threshold (`bin + 0.5`).
    pub threshold: f32,
    /// Gain over the unsplit parent.
    pub gain: f32,
    pub left: NodeStats,
    pub right: NodeStats,
}

/// Find the highest-gain valid split of a node.
///
/// Returns `None` when no split has positive gain or satisfies the child
/// constraints. Ties keep the earliest `(feature, bin)`.
pub fn find_best_split(
    histogram: &NodeHistogram,
    parent: NodeStats,
    params: &GainParams,
) -> Option<SplitInfo> {
    let mut best: Option<SplitInfo> = None;

    for (feature, hist) in histogram.features().iter().enumerate() {
        let n_bins = hist.n_bins();
        let mut left = NodeStats::default();

        // The last bin cannot be a split point: nothing would go right.
        for bin in 0..n_bins.saturating_sub(1) {
            let (g, h) = hist.bins()[bin];
            left.grad += g;
            left.hess += h;
            left.count += hist.counts()[bin];

            let right = parent.minus(left);
            if left.count == 0 || right.count == 0 {
                continue;
            }
            if !params.admits(left, right) {
                continue;
            }

            let gain = params.split_gain(left, right, parent);
            if gain <= 0.0 {
                continue;
            }
            if best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(SplitInfo {
                    feature: feature as u32,
                    bin: bin as u32,
                    threshold: bin as f32 + 0.5,
                    gain,
                    left,
                    right,
                });
            }
        }
    }

    best
}
