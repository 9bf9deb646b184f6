//! Gradient-boosted decision tree model.

mod config;
mod model;
mod params;

pub use config::{ConfigError, GBDTConfig};
pub use model::GBDTModel;
pub use params::{ParamValidationError, RegularizationParams, SamplingParams, TreeParams};
