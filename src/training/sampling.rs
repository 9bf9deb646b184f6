//! Row subsampling per boosting round.
//!
//! With `subsample < 1`, each round trains its tree on a random subset of
//! `ceil(n_rows * subsample)` rows drawn without replacement. The sampler owns
//! a seeded `StdRng`, so a training run is reproducible for a fixed seed.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Draws the rows used by each round.
#[derive(Debug)]
pub struct RowSampler {
    subsample: f32,
    n_rows: usize,
    rng: StdRng,
}

impl RowSampler {
    pub fn new(subsample: f32, n_rows: usize, seed: u64) -> Self {
        Self {
            subsample,
            n_rows,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Whether rounds use a subset of rows.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.subsample < 1.0
    }

    /// Sorted row subset for the next round, or `None` to use every row.
    pub fn sample(&mut self) -> Option<Vec<u32>> {
        if !self.is_enabled() {
            return None;
        }
        let amount = ((self.n_rows as f64 * self.subsample as f64).ceil() as usize).clamp(1, self.n_rows);
        let mut rows: Vec<u32> = index::sample(&mut self.rng, self.n_rows, amount)
            .into_iter()
            .map(|r| r as u32)
            .collect();
        rows.sort_unstable();
        Some(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rate_disables_sampling() {
        let mut sampler = RowSampler::new(1.0, 10, 42);
        assert!(!sampler.is_enabled());
        assert_eq!(sampler.sample(), None);
    }

    #[test]
    fn subset_size_and_uniqueness() {
        let mut sampler = RowSampler::new(0.5, 101, 42);
        let rows = sampler.sample().unwrap();
        assert_eq!(rows.len(), 51);
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
        assert!(rows.iter().all(|&r| r < 101));
    }

    #[test]
    fn reproducible_for_seed() {
        let mut a = RowSampler::new(0.3, 50, 7);
        let mut b = RowSampler::new(0.3, 50, 7);
        for _ in 0..3 {
            assert_eq!(a.sample(), b.sample());
        }
    }
}
