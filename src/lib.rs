//! mycoboost: a gradient-boosted mushroom edibility classifier.
//!
//! The crate has two entry points sharing one library:
//!
//! - `mycoboost-train` loads the mushroom table, encodes it, trains a
//!   gradient boosted tree ensemble and writes the artifact set
//!   (model, feature list, metrics) via [`pipeline::run_training`].
//! - `mycoboost-serve` loads that artifact set once and serves a dashboard
//!   with an inference form, a metrics page and a dataset preview
//!   ([`serve::build_router`]).
//!
//! Supporting modules:
//!
//! - [`data`]: tables, categorical encoding, train/test split, binning
//! - [`training`]: gradients, objective, metrics and the tree trainer
//! - [`repr`]: trained trees and forests
//! - [`model`]: the [`model::GBDTModel`] classifier and its configuration
//! - [`explainability`]: feature importance
//! - [`persist`]: versioned JSON model format
//! - [`artifacts`]: reading and writing the artifact set
//! - [`config`]: YAML application configuration

pub mod artifacts;
pub mod config;
pub mod data;
pub mod explainability;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod repr;
pub mod serve;
pub mod training;
