//! Row partitioning for tree training.
//!
//! All row indices of the tree being grown live in one buffer; each leaf owns
//! a contiguous range of it. Splitting a leaf partitions its range in place.
//!
//! ```text
//! Initial (all rows in leaf 0):
//!   indices: [0, 1, 2, 3, 4, 5, 6, 7]
//!   ranges:  [0..8]
//!
//! After splitting leaf 0 on an even/odd feature:
//!   indices: [0, 2, 4, 6, 1, 3, 5, 7]
//!   ranges:  [0..4, 4..8]
//! ```

use std::ops::Range;

use crate::data::BinnedDataset;

/// Leaf identifier (index during training).
pub type LeafId = u32;

/// Row indices per leaf during tree training.
#[derive(Debug, Default)]
pub struct RowPartitioner {
    indices: Vec<u32>,
    ranges: Vec<Range<usize>>,
}

impl RowPartitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new tree with all rows (or only `sampled` rows) in leaf 0.
    pub fn reset(&mut self, n_samples: usize, sampled: Option<&[u32]>) {
        self.indices.clear();
        match sampled {
            None => self.indices.extend(0..n_samples as u32),
            Some(rows) => self.indices.extend_from_slice(rows),
        }
        self.ranges.clear();
        self.ranges.push(0..self.indices.len());
    }

    /// Row indices of `leaf`.
    #[inline]
    pub fn rows(&self, leaf: LeafId) -> &[u32] {
        &self.indices[self.ranges[leaf as usize].clone()]
    }

    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.ranges.len()
    }

    /// Split `leaf`: rows whose bin of `feature` is `<= bin` stay in `leaf`,
    /// the rest move to a newly allocated leaf, whose ID is returned.
    pub fn split(&mut self, leaf: LeafId, feature: u32, bin: u32, dataset: &BinnedDataset) -> LeafId {
        let range = self.ranges[leaf as usize].clone();
        let bins = dataset.feature_bins(feature as usize);

        let mut left_end = range.start;
        for i in range.clone() {
            if (bins[self.indices[i] as usize] as u32) <= bin {
                self.indices.swap(i, left_end);
                left_end += 1;
            }
        }

        self.ranges[leaf as usize] = range.start..left_end;
        self.ranges.push(left_end..range.end);
        (self.ranges.len() - 1) as LeafId
    }
}
