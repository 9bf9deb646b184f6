//! Hyper-parameter groups nested inside [`GBDTConfig`](super::GBDTConfig).
//!
//! Tree shape, leaf regularization and row subsampling are kept apart so each
//! group validates on its own.

// =============================================================================
// TreeParams
// =============================================================================

/// Tree structure parameters. Trees grow depth-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeParams {
    /// Maximum depth of every tree. Default: 6.
    pub max_depth: u32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self { max_depth: 6 }
    }
}

impl TreeParams {
    pub fn depth_wise(max_depth: u32) -> Self {
        Self { max_depth }
    }
}

// =============================================================================
// RegularizationParams
// =============================================================================

/// Leaf weight penalties and the constraints a split must satisfy.
///
/// ```
/// use mycoboost::model::gbdt::RegularizationParams;
///
/// let params = RegularizationParams {
///     lambda: 1.0,
///     min_child_weight: 5.0,
///     ..Default::default()
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizationParams {
    /// L2 penalty on leaf weights (default 1.0).
    pub lambda: f32,

    /// L1 penalty on leaf weights (default 0.0).
    pub alpha: f32,

    /// Smallest hessian sum a child may have (default 1.0).
    pub min_child_weight: f32,

    /// Splits gaining less than this are not made (default 0.0).
    pub min_gain: f32,

    /// Smallest number of rows a child may have (default 1).
    pub min_samples_leaf: u32,
}

impl Default for RegularizationParams {
    fn default() -> Self {
        Self {
            lambda: 1.0,
            alpha: 0.0,
            min_child_weight: 1.0,
            min_gain: 0.0,
            min_samples_leaf: 1,
        }
    }
}

impl RegularizationParams {
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if !(self.lambda >= 0.0) {
            return Err(ParamValidationError::InvalidLambda(self.lambda));
        }
        if !(self.alpha >= 0.0) {
            return Err(ParamValidationError::InvalidAlpha(self.alpha));
        }
        if !(self.min_child_weight >= 0.0) {
            return Err(ParamValidationError::InvalidMinChildWeight(self.min_child_weight));
        }
        if !(self.min_gain >= 0.0) {
            return Err(ParamValidationError::InvalidMinGain(self.min_gain));
        }
        Ok(())
    }
}

// =============================================================================
// SamplingParams
// =============================================================================

/// Row sampling parameters. A rate of 1.0 means no sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    /// Fraction of rows each tree is trained on. Default: 1.0.
    pub subsample: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self { subsample: 1.0 }
    }
}

impl SamplingParams {
    /// Subsample must be in (0, 1].
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(ParamValidationError::InvalidSubsample(self.subsample));
        }
        Ok(())
    }

    pub fn has_row_sampling(&self) -> bool {
        self.subsample < 1.0
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A parameter group holds an out-of-range value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamValidationError {
    #[error("lambda must be >= 0, got {0}")]
    InvalidLambda(f32),

    #[error("alpha must be >= 0, got {0}")]
    InvalidAlpha(f32),

    #[error("min_child_weight must be >= 0, got {0}")]
    InvalidMinChildWeight(f32),

    #[error("min_gain must be >= 0, got {0}")]
    InvalidMinGain(f32),

    #[error("subsample must be in (0, 1], got {0}")]
    InvalidSubsample(f32),
}
