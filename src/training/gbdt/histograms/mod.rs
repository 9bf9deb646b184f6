//! Gradient histograms for split finding.
//!
//! Bins are plain `(grad_sum, hess_sum)` tuples accumulated in f64, with a
//! parallel row-count array. A sibling's histogram is derived from its parent
//! with the subtraction trick, so only the smaller child of each split is
//! built from rows.

use crate::data::BinnedDataset;
use crate::training::Gradients;

use super::split::NodeStats;

/// `(grad_sum, hess_sum)` of one bin.
pub type HistogramBin = (f64, f64);

/// Histogram of one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureHistogram {
    bins: Vec<HistogramBin>,
    counts: Vec<u32>,
}

impl FeatureHistogram {
    fn zeros(n_bins: usize) -> Self {
        Self {
            bins: vec![(0.0, 0.0); n_bins],
            counts: vec![0; n_bins],
        }
    }

    #[inline]
    pub fn n_bins(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    #[inline]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }
}

/// Histograms of every feature for the rows of one tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeHistogram {
    features: Vec<FeatureHistogram>,
    totals: NodeStats,
}

impl NodeHistogram {
    /// Accumulate `rows` into fresh histograms.
    pub fn build(dataset: &BinnedDataset, gradients: &Gradients, rows: &[u32]) -> Self {
        // Gather once so the per-feature loops read gradients sequentially.
        let ordered: Vec<_> = rows.iter().map(|&r| gradients.pairs()[r as usize]).collect();

        let features = (0..dataset.n_features())
            .map(|f| {
                let bins = dataset.feature_bins(f);
                let mut hist = FeatureHistogram::zeros(dataset.n_bins(f) as usize);
                for (&row, pair) in rows.iter().zip(&ordered) {
                    let b = bins[row as usize] as usize;
                    hist.bins[b].0 += pair.grad as f64;
                    hist.bins[b].1 += pair.hess as f64;
                    hist.counts[b] += 1;
                }
                hist
            })
            .collect();

        let totals = ordered.iter().fold(
            NodeStats {
                count: rows.len() as u32,
                ..Default::default()
            },
            |acc, p| NodeStats {
                grad: acc.grad + p.grad as f64,
                hess: acc.hess + p.hess as f64,
                ..acc
            },
        );

        Self { features, totals }
    }

    /// `parent - child`: the histogram of the child's sibling.
    pub fn subtract(parent: &NodeHistogram, child: &NodeHistogram) -> Self {
        let features = parent
            .features
            .iter()
            .zip(&child.features)
            .map(|(p, c)| FeatureHistogram {
                bins: p
                    .bins
                    .iter()
                    .zip(&c.bins)
                    .map(|(&(pg, ph), &(cg, ch))| (pg - cg, ph - ch))
                    .collect(),
                counts: p.counts.iter().zip(&c.counts).map(|(&pc, &cc)| pc - cc).collect(),
            })
            .collect();

        Self {
            features,
            totals: parent.totals.minus(child.totals),
        }
    }

    #[inline]
    pub fn features(&self) -> &[FeatureHistogram] {
        &self.features
    }

    /// Gradient statistics over all rows of the node.
    #[inline]
    pub fn totals(&self) -> NodeStats {
        self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::training::GradsTuple;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    fn fixture() -> (BinnedDataset, Gradients) {
        let features = array![[0.0, 1.0], [1.0, 1.0], [2.0, 0.0], [0.0, 0.0]];
        let ds = Dataset::from_parts(features, Array1::zeros(4), vec!["a".into(), "b".into()], vec![3, 2]);
        let mut gradients = Gradients::new(4);
        for (i, pair) in gradients.pairs_mut().iter_mut().enumerate() {
            *pair = GradsTuple {
                grad: i as f32,
                hess: 1.0,
            };
        }
        (BinnedDataset::from_dataset(&ds).unwrap(), gradients)
    }

    #[test]
    fn build_accumulates_per_bin() {
        let (binned, gradients) = fixture();
        let hist = NodeHistogram::build(&binned, &gradients, &[0, 1, 2, 3]);

        let a = &hist.features()[0];
        assert_eq!(a.counts(), &[2, 1, 1]);
        assert_eq!(a.bins()[0], (3.0, 2.0)); // rows 0 and 3
        assert_eq!(hist.features()[1].counts(), &[2, 2]);

        let totals = hist.totals();
        assert_eq!(totals.count, 4);
        assert_abs_diff_eq!(totals.grad, 6.0);
        assert_abs_diff_eq!(totals.hess, 4.0);
    }

    #[test]
    fn subtraction_matches_direct_build() {
        let (binned, gradients) = fixture();
        let parent = NodeHistogram::build(&binned, &gradients, &[0, 1, 2, 3]);
        let left = NodeHistogram::build(&binned, &gradients, &[0, 3]);
        let right = NodeHistogram::build(&binned, &gradients, &[1, 2]);

        assert_eq!(NodeHistogram::subtract(&parent, &left), right);
    }
}
