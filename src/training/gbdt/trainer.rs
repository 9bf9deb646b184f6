//! GBDT trainer for gradient boosting.
//!
//! Orchestrates objective computation, tree growing, and prediction updates.
//! Use [`GBDTTrainer::train`] to train a forest from a binned dataset.

use ndarray::ArrayView1;

use crate::data::BinnedDataset;
use crate::repr::gbdt::Forest;
use crate::training::logger::{TrainingLogger, Verbosity};
use crate::training::metrics::MetricFn;
use crate::training::objectives::ObjectiveFn;
use crate::training::sampling::RowSampler;
use crate::training::Gradients;

use super::grower::{GrowerParams, TreeGrower};
use super::split::GainParams;

/// Errors raised before or during training.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainError {
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("expected {expected} targets, got {got}")]
    TargetLengthMismatch { expected: usize, got: usize },

    #[error("target at row {row} is {value}, binary targets must be 0 or 1")]
    InvalidTarget { row: usize, value: f32 },
}

// =============================================================================
// GBDTParams
// =============================================================================

/// Parameters for GBDT training.
#[derive(Clone, Debug)]
pub struct GBDTParams {
    /// Number of boosting rounds (trees to train).
    pub n_trees: u32,
    /// Learning rate (shrinkage).
    pub learning_rate: f32,
    /// Maximum tree depth.
    pub max_depth: u32,
    /// Regularization and split constraints.
    pub gain: GainParams,
    /// Fraction of rows each tree is trained on, in (0, 1].
    pub subsample: f32,
    pub verbosity: Verbosity,
    /// Random seed for row sampling.
    pub seed: u64,
}

impl Default for GBDTParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            learning_rate: 0.3,
            max_depth: 6,
            gain: GainParams::default(),
            subsample: 1.0,
            verbosity: Verbosity::default(),
            seed: 42,
        }
    }
}

impl GBDTParams {
    fn to_grower_params(&self) -> GrowerParams {
        GrowerParams {
            gain: self.gain.clone(),
            learning_rate: self.learning_rate,
            max_depth: self.max_depth,
        }
    }
}

// =============================================================================
// GBDTTrainer
// =============================================================================

/// GBDT trainer.
pub struct GBDTTrainer<O: ObjectiveFn, M: MetricFn> {
    objective: O,
    metric: M,
    params: GBDTParams,
}

impl<O: ObjectiveFn, M: MetricFn> GBDTTrainer<O, M> {
    pub fn new(objective: O, metric: M, params: GBDTParams) -> Self {
        Self {
            objective,
            metric,
            params,
        }
    }

    pub fn params(&self) -> &GBDTParams {
        &self.params
    }

    /// Train a forest on `dataset` with `{0, 1}` `targets`.
    ///
    /// The training metric is only computed when verbosity is `Info` or above.
    pub fn train(&self, dataset: &BinnedDataset, targets: ArrayView1<'_, f32>) -> Result<Forest, TrainError> {
        let n_rows = dataset.n_samples();
        if n_rows == 0 {
            return Err(TrainError::EmptyDataset);
        }
        if targets.len() != n_rows {
            return Err(TrainError::TargetLengthMismatch {
                expected: n_rows,
                got: targets.len(),
            });
        }
        if let Some((row, &value)) = targets.iter().enumerate().find(|(_, &t)| t != 0.0 && t != 1.0) {
            return Err(TrainError::InvalidTarget { row, value });
        }
        let targets = targets.to_vec();

        let mut grower = TreeGrower::new(self.params.to_grower_params());
        let mut row_sampler = RowSampler::new(self.params.subsample, n_rows, self.params.seed);
        let mut gradients = Gradients::new(n_rows);

        let base_score = self.objective.compute_base_score(&targets);
        let mut predictions = vec![base_score; n_rows];
        let mut forest = Forest::new(base_score);

        let mut logger = TrainingLogger::new(self.params.verbosity);
        logger.start_training(self.params.n_trees as usize);

        let mut probabilities = Vec::with_capacity(n_rows);
        for round in 0..self.params.n_trees as usize {
            self.objective
                .compute_gradients(&predictions, &targets, gradients.pairs_mut());

            let sampled = row_sampler.sample();
            let tree = grower.grow(dataset, &gradients, sampled.as_deref()).freeze();

            if sampled.is_none() {
                grower.update_predictions_from_last_tree(&tree, &mut predictions);
            } else {
                // The tree saw a subset; it still applies to every row.
                for (row, pred) in predictions.iter_mut().enumerate() {
                    *pred += tree.predict_binned_row(dataset, row);
                }
            }
            logger.log_tree(round, tree.n_nodes(), tree.n_leaves());
            forest.push_tree(tree);

            if logger.verbosity() >= Verbosity::Info {
                probabilities.clear();
                probabilities.extend(predictions.iter().map(|&p| self.objective.transform(p)));
                let value = self.metric.compute(&probabilities, &targets);
                logger.log_metrics(round, &[(self.metric.name(), value)]);
            }
        }

        logger.finish_training(forest.n_trees());
        Ok(forest)
    }
}
