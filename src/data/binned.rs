//! Binned feature storage for histogram-based training.
//!
//! Every feature here is a category code, so binning is exact: bin `b` holds
//! the samples whose code equals `b`, and a feature has one bin per category.
//! Storage is feature-major (`[n_features, n_samples]`) so that building a
//! feature's histogram walks one contiguous row.

use ndarray::{Array2, ArrayView1};

use super::Dataset;

/// Largest number of bins a feature may use.
pub const MAX_BINS: u32 = 256;

/// Errors building a [`BinnedDataset`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinningError {
    #[error("feature {feature} has {n_bins} categories, at most {MAX_BINS} are supported")]
    TooManyBins { feature: usize, n_bins: u32 },

    #[error("feature {feature}, sample {sample}: value {value} is not a code in [0, {n_bins})")]
    InvalidCode {
        feature: usize,
        sample: usize,
        value: f32,
        n_bins: u32,
    },
}

/// Feature-major category bins.
#[derive(Debug, Clone)]
pub struct BinnedDataset {
    bins: Array2<u8>,
    n_bins: Vec<u32>,
}

impl BinnedDataset {
    /// Bin every feature of `dataset` by its category code.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, BinningError> {
        let features = dataset.features();
        let n_bins = dataset.n_categories().to_vec();
        let mut bins = Array2::<u8>::zeros((dataset.n_features(), dataset.n_samples()));

        for (feature, (&nb, mut out)) in n_bins.iter().zip(bins.rows_mut()).enumerate() {
            if nb > MAX_BINS {
                return Err(BinningError::TooManyBins { feature, n_bins: nb });
            }
            for (sample, (&value, slot)) in features.column(feature).iter().zip(out.iter_mut()).enumerate() {
                if value.fract() != 0.0 || value < 0.0 || value >= nb as f32 {
                    return Err(BinningError::InvalidCode {
                        feature,
                        sample,
                        value,
                        n_bins: nb,
                    });
                }
                *slot = value as u8;
            }
        }

        Ok(Self { bins, n_bins })
    }

    /// Number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.bins.ncols()
    }

    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.bins.nrows()
    }

    /// Number of bins of `feature`.
    #[inline]
    pub fn n_bins(&self, feature: usize) -> u32 {
        self.n_bins[feature]
    }

    /// Bins of `feature` for every sample.
    #[inline]
    pub fn feature_bins(&self, feature: usize) -> ArrayView1<'_, u8> {
        self.bins.row(feature)
    }

    /// Bin of (`sample`, `feature`).
    #[inline]
    pub fn bin(&self, sample: usize, feature: usize) -> u8 {
        self.bins[[feature, sample]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn dataset(features: Array2<f32>, n_categories: Vec<u32>) -> Dataset {
        let n = features.nrows();
        let names = (0..features.ncols()).map(|i| format!("f{i}")).collect();
        Dataset::from_parts(features, ndarray::Array1::zeros(n), names, n_categories)
    }

    #[test]
    fn bins_are_feature_major() {
        let ds = dataset(array![[0.0, 2.0], [1.0, 0.0], [2.0, 1.0]], vec![3, 3]);
        let binned = BinnedDataset::from_dataset(&ds).unwrap();

        assert_eq!(binned.n_samples(), 3);
        assert_eq!(binned.n_features(), 2);
        assert_eq!(binned.feature_bins(0).to_vec(), vec![0, 1, 2]);
        assert_eq!(binned.feature_bins(1).to_vec(), vec![2, 0, 1]);
        assert_eq!(binned.bin(0, 1), 2);
        assert_eq!(binned.n_bins(1), 3);
    }

    #[test]
    fn code_outside_vocabulary_is_rejected() {
        let ds = dataset(array![[0.0], [3.0]], vec![3]);
        assert!(matches!(
            BinnedDataset::from_dataset(&ds),
            Err(BinningError::InvalidCode { feature: 0, sample: 1, .. })
        ));
    }

    #[test]
    fn fractional_code_is_rejected() {
        let ds = dataset(array![[0.5]], vec![2]);
        assert!(BinnedDataset::from_dataset(&ds).is_err());
    }

    #[test]
    fn too_many_categories() {
        let ds = dataset(array![[0.0]], vec![300]);
        assert_eq!(
            BinnedDataset::from_dataset(&ds).unwrap_err(),
            BinningError::TooManyBins { feature: 0, n_bins: 300 }
        );
    }
}
