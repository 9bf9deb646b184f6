//! High-level model types.
//!
//! - [`GBDTModel`]: gradient-boosted trees for binary classification
//! - [`Classifier`]: the predict / serialize capability the dashboard relies on
//! - [`ModelMeta`]: feature names, vocabularies and label classes

mod classifier;
pub mod gbdt;
mod meta;

pub use classifier::{Classifier, FeatureVector, LabelIndex, PredictError};
pub use gbdt::{GBDTConfig, GBDTModel};
pub use meta::{ModelMeta, TaskKind};
