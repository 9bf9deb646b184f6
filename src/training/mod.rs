//! Training infrastructure for gradient boosting.
//!
//! - [`Gradients`], [`GradsTuple`]: per-sample gradient storage
//! - [`ObjectiveFn`], [`LogisticLoss`]: loss functions
//! - [`MetricFn`], [`Accuracy`], [`LogLoss`], [`ClassificationReport`]: evaluation
//! - [`TrainingLogger`], [`Verbosity`]: progress logging through `tracing`
//! - [`gbdt`]: histogram-based tree training

pub mod gbdt;
mod gradients;
mod logger;
mod metrics;
mod objectives;
pub mod sampling;

pub use gradients::{GradsTuple, Gradients};
pub use logger::{TrainingLogger, Verbosity};
pub use metrics::{Accuracy, ClassScores, ClassificationReport, LogLoss, MetricFn};
pub use objectives::{LogisticLoss, ObjectiveFn};

pub use gbdt::{GBDTParams, GBDTTrainer, GainParams, TrainError};
pub(crate) use metrics::round_to;
