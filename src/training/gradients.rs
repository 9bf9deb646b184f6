//! Per-sample gradient/hessian storage.
//!
//! Binary classification has a single output, so the buffer is one pair per
//! training sample, indexed by sample id.

/// Gradient and hessian of the loss for one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradsTuple {
    /// First derivative of the loss w.r.t. the raw score.
    pub grad: f32,
    /// Second derivative of the loss w.r.t. the raw score.
    pub hess: f32,
}

/// Gradient buffer for one boosting round.
///
/// # Example
///
/// ```
/// use mycoboost::training::{Gradients, GradsTuple};
///
/// let mut buffer = Gradients::new(2);
/// buffer.pairs_mut()[1] = GradsTuple { grad: -0.5, hess: 0.25 };
/// assert_eq!(buffer.get(1), (-0.5, 0.25));
/// assert_eq!(buffer.sum(&[0, 1]), (-0.5, 0.25));
/// ```
#[derive(Debug, Clone)]
pub struct Gradients {
    pairs: Vec<GradsTuple>,
}

impl Gradients {
    /// Create a zeroed buffer for `n_samples` samples.
    ///
    /// # Panics
    ///
    /// Panics if `n_samples` is zero.
    pub fn new(n_samples: usize) -> Self {
        assert!(n_samples > 0, "n_samples must be positive");
        Self {
            pairs: vec![GradsTuple::default(); n_samples],
        }
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn pairs(&self) -> &[GradsTuple] {
        &self.pairs
    }

    #[inline]
    pub fn pairs_mut(&mut self) -> &mut [GradsTuple] {
        &mut self.pairs
    }

    /// `(grad, hess)` of one sample.
    #[inline]
    pub fn get(&self, sample: usize) -> (f32, f32) {
        let p = self.pairs[sample];
        (p.grad, p.hess)
    }

    /// Sum gradients and hessians over `rows`, accumulated in f64.
    pub fn sum(&self, rows: &[u32]) -> (f64, f64) {
        rows.iter().fold((0.0, 0.0), |(g, h), &r| {
            let p = self.pairs[r as usize];
            (g + p.grad as f64, h + p.hess as f64)
        })
    }
}
