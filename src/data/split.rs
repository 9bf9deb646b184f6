//! Seeded train/test partitioning of row indices.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Errors from [`train_test_split`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    #[error("test fraction must be in (0, 1), got {0}")]
    InvalidFraction(f64),

    #[error("cannot split {n_rows} rows into non-empty train and test sets")]
    TooFewRows { n_rows: usize },
}

/// Row indices of the training and held-out subsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    /// Training rows, in shuffled order.
    pub train: Vec<usize>,
    /// Held-out rows, in shuffled order.
    pub test: Vec<usize>,
}

impl TrainTestSplit {
    /// Total number of rows covered by the split.
    pub fn n_rows(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

/// Shuffle `0..n_rows` with a fixed seed and cut off the held-out rows.
///
/// The held-out size is `ceil(n_rows * test_fraction)`. Both subsets are
/// disjoint and together cover every row exactly once. The same
/// `(n_rows, test_fraction, seed)` always produces the same split.
pub fn train_test_split(
    n_rows: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit, SplitError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SplitError::InvalidFraction(test_fraction));
    }

    let n_test = (n_rows as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n_rows {
        return Err(SplitError::TooFewRows { n_rows });
    }

    let mut idx: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let (test, train) = idx.split_at(n_test);
    Ok(TrainTestSplit {
        train: train.to_vec(),
        test: test.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(8124, 0.3, 2438)]
    #[case(100, 0.3, 30)]
    #[case(10, 0.25, 3)]
    #[case(7, 0.5, 4)]
    fn test_size_is_ceiled(#[case] n_rows: usize, #[case] fraction: f64, #[case] n_test: usize) {
        let split = train_test_split(n_rows, fraction, 42).unwrap();
        assert_eq!(split.test.len(), n_test);
        assert_eq!(split.train.len(), n_rows - n_test);
    }

    #[test]
    fn subsets_are_disjoint_and_cover_all_rows() {
        let split = train_test_split(1000, 0.3, 42).unwrap();
        let train: HashSet<_> = split.train.iter().copied().collect();
        let test: HashSet<_> = split.test.iter().copied().collect();

        assert!(train.is_disjoint(&test));
        let union: HashSet<_> = train.union(&test).copied().collect();
        assert_eq!(union, (0..1000).collect::<HashSet<_>>());
        assert_eq!(split.n_rows(), 1000);
    }

    #[test]
    fn same_seed_same_split() {
        let a = train_test_split(500, 0.3, 42).unwrap();
        let b = train_test_split(500, 0.3, 42).unwrap();
        assert_eq!(a, b);

        let c = train_test_split(500, 0.3, 7).unwrap();
        assert_ne!(a.test, c.test);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(-0.1)]
    #[case(f64::NAN)]
    fn invalid_fraction(#[case] fraction: f64) {
        assert!(matches!(
            train_test_split(100, fraction, 42),
            Err(SplitError::InvalidFraction(_))
        ));
    }

    #[test]
    fn too_few_rows() {
        assert_eq!(
            train_test_split(1, 0.3, 42),
            Err(SplitError::TooFewRows { n_rows: 1 })
        );
    }
}
