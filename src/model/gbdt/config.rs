//! Hyper-parameters of the boosted classifier, built and validated through
//! a `bon` builder.
//!
//! ```
//! use mycoboost::model::gbdt::{GBDTConfig, TreeParams};
//!
//! // All defaults
//! let config = GBDTConfig::builder().build().unwrap();
//! assert_eq!(config.n_trees, 100);
//!
//! // The dashboard's classifier
//! let config = GBDTConfig::builder()
//!     .n_trees(100)
//!     .learning_rate(0.1)
//!     .tree(TreeParams::depth_wise(3))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.tree.max_depth, 3);
//! ```

use bon::Builder;

use super::{ParamValidationError, RegularizationParams, SamplingParams, TreeParams};
use crate::training::{GBDTParams, GainParams, Verbosity};

// =============================================================================
// ConfigError
// =============================================================================

/// A hyper-parameter is out of range.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Learning rate must be positive.
    InvalidLearningRate(f32),
    /// Number of trees must be at least 1.
    InvalidNTrees,
    /// Invalid sampling ratio (must be in (0, 1]).
    InvalidSamplingRatio { field: &'static str, value: f32 },
    /// Invalid regularization parameter.
    InvalidRegularization { field: &'static str, value: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLearningRate(v) => {
                write!(f, "learning_rate must be positive, got {}", v)
            }
            Self::InvalidNTrees => write!(f, "n_trees must be at least 1"),
            Self::InvalidSamplingRatio { field, value } => {
                write!(f, "{} must be in (0, 1], got {}", field, value)
            }
            Self::InvalidRegularization { field, value } => {
                write!(f, "{} must be non-negative, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ParamValidationError> for ConfigError {
    fn from(e: ParamValidationError) -> Self {
        let (field, value) = match e {
            ParamValidationError::InvalidSubsample(v) => {
                return ConfigError::InvalidSamplingRatio {
                    field: "subsample",
                    value: v,
                }
            }
            ParamValidationError::InvalidLambda(v) => ("lambda", v),
            ParamValidationError::InvalidAlpha(v) => ("alpha", v),
            ParamValidationError::InvalidMinChildWeight(v) => ("min_child_weight", v),
            ParamValidationError::InvalidMinGain(v) => ("min_gain", v),
        };
        ConfigError::InvalidRegularization { field, value }
    }
}

// =============================================================================
// GBDTConfig
// =============================================================================

/// Configuration for training a binary GBDT classifier.
///
/// Parameters are grouped: boosting (`n_trees`, `learning_rate`), tree shape
/// ([`TreeParams`]), regularization ([`RegularizationParams`]) and sampling
/// ([`SamplingParams`]). The `bon` builder validates everything at build time.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct GBDTConfig {
    /// Number of boosting rounds (trees to train). Default: 100.
    #[builder(default = 100)]
    pub n_trees: u32,

    /// Learning rate (shrinkage). Default: 0.3.
    #[builder(default = 0.3)]
    pub learning_rate: f32,

    #[builder(default)]
    pub tree: TreeParams,

    #[builder(default)]
    pub regularization: RegularizationParams,

    #[builder(default)]
    pub sampling: SamplingParams,

    /// Random seed. Default: 42.
    #[builder(default = 42)]
    pub seed: u64,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl<S: g_b_d_t_config_builder::IsComplete> GBDTConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// - `learning_rate <= 0`
    /// - `n_trees == 0`
    /// - `subsample` outside (0, 1]
    /// - negative regularization parameters
    pub fn build(self) -> Result<GBDTConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl GBDTConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if self.n_trees == 0 {
            return Err(ConfigError::InvalidNTrees);
        }
        self.sampling.validate()?;
        self.regularization.validate()?;
        Ok(())
    }

    /// Trainer parameters for this configuration.
    pub(crate) fn to_trainer_params(&self) -> GBDTParams {
        GBDTParams {
            n_trees: self.n_trees,
            learning_rate: self.learning_rate,
            max_depth: self.tree.max_depth,
            gain: GainParams::from(&self.regularization),
            subsample: self.sampling.subsample,
            verbosity: self.verbosity,
            seed: self.seed,
        }
    }
}

impl Default for GBDTConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_config_is_valid() {
        let config = GBDTConfig::builder().build().unwrap();
        assert_eq!(config.n_trees, 100);
        assert!((config.learning_rate - 0.3).abs() < 1e-6);
        assert_eq!(config.seed, 42);
        assert_eq!(config, GBDTConfig::default());
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.1)]
    #[case(f32::NAN)]
    fn invalid_learning_rate(#[case] lr: f32) {
        let result = GBDTConfig::builder().learning_rate(lr).build();
        assert!(matches!(result, Err(ConfigError::InvalidLearningRate(_))));
    }

    #[test]
    fn invalid_n_trees() {
        let result = GBDTConfig::builder().n_trees(0).build();
        assert_eq!(result, Err(ConfigError::InvalidNTrees));
    }

    #[test]
    fn invalid_subsample() {
        let result = GBDTConfig::builder()
            .sampling(SamplingParams { subsample: 0.0 })
            .build();
        assert_eq!(
            result,
            Err(ConfigError::InvalidSamplingRatio {
                field: "subsample",
                value: 0.0
            })
        );
    }

    #[test]
    fn invalid_regularization() {
        let result = GBDTConfig::builder()
            .regularization(RegularizationParams {
                min_child_weight: -1.0,
                ..Default::default()
            })
            .build();
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "min_child_weight must be non-negative, got -1");
    }

    #[test]
    fn trainer_params_carry_every_group() {
        let config = GBDTConfig::builder()
            .learning_rate(0.1)
            .tree(TreeParams::depth_wise(3))
            .sampling(SamplingParams { subsample: 0.5 })
            .seed(7)
            .build()
            .unwrap();
        let params = config.to_trainer_params();
        assert_eq!(params.max_depth, 3);
        assert_eq!(params.subsample, 0.5);
        assert_eq!(params.seed, 7);
        assert!((params.learning_rate - 0.1).abs() < 1e-6);
    }
}
