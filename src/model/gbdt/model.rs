//! GBDT model implementation.
//!
//! High-level wrapper around [`Forest`] with training and prediction.
//! Access components via [`forest()`](GBDTModel::forest), [`meta()`](GBDTModel::meta),
//! and [`config()`](GBDTModel::config).

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::data::BinnedDataset;
use crate::explainability::{compute_forest_importance, ExplainError, FeatureImportance, ImportanceType};
use crate::model::{Classifier, FeatureVector, LabelIndex, ModelMeta, PredictError};
use crate::persist::{self, ReadError, WriteError};
use crate::repr::gbdt::Forest;
use crate::training::gbdt::{GBDTTrainer, TrainError};
use crate::training::{LogLoss, LogisticLoss, ObjectiveFn};

use super::GBDTConfig;

/// Probability at or above which label index 1 is predicted.
const DECISION_THRESHOLD: f32 = 0.5;

/// High-level GBDT model with training, prediction, and explainability.
#[derive(Clone, PartialEq)]
pub struct GBDTModel {
    forest: Forest,
    meta: ModelMeta,
    config: GBDTConfig,
}

impl GBDTModel {
    /// Create a model from a forest and metadata, with the default config.
    pub fn from_forest(forest: Forest, meta: ModelMeta) -> Self {
        Self {
            forest,
            meta,
            config: GBDTConfig::default(),
        }
    }

    /// Create a model from all its parts.
    pub fn from_parts(forest: Forest, meta: ModelMeta, config: GBDTConfig) -> Self {
        Self { forest, meta, config }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    pub fn config(&self) -> &GBDTConfig {
        &self.config
    }

    /// Set feature names.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.meta.feature_names = names;
        self
    }

    /// Set the category vocabulary of every feature.
    pub fn with_vocabularies(mut self, vocabularies: Vec<Vec<String>>) -> Self {
        self.meta.vocabularies = Some(vocabularies);
        self
    }

    /// Set the label classes (position = label index).
    pub fn with_label_classes(mut self, classes: Vec<String>) -> Self {
        self.meta.label_classes = Some(classes);
        self
    }

    // =========================================================================
    // Training
    // =========================================================================

    /// Train a new binary GBDT classifier.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Binned training dataset
    /// * `targets` - Label indices (0 or 1), one per sample
    /// * `config` - Training configuration
    pub fn train(
        dataset: &BinnedDataset,
        targets: ArrayView1<'_, f32>,
        config: GBDTConfig,
    ) -> Result<Self, TrainError> {
        let objective = LogisticLoss;
        let task = objective.task_kind();
        let trainer = GBDTTrainer::new(objective, LogLoss, config.to_trainer_params());
        let forest = trainer.train(dataset, targets)?;

        let meta = ModelMeta {
            task,
            base_score: forest.base_score(),
            ..ModelMeta::for_binary_classification(dataset.n_features())
        };

        Ok(Self { forest, meta, config })
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Raw margins for a sample-major matrix `[n_samples, n_features]`.
    pub fn predict_raw(&self, features: ArrayView2<'_, f32>) -> Result<Array1<f32>, PredictError> {
        self.check_width(features.ncols())?;
        Ok(self.forest.predict_margins(features))
    }

    /// Probability of label index 1 for every row.
    pub fn predict_probabilities(&self, features: ArrayView2<'_, f32>) -> Result<Array1<f32>, PredictError> {
        Ok(self.predict_raw(features)?.mapv(LogisticLoss::sigmoid))
    }

    /// Predicted label index for every row.
    pub fn predict_labels(&self, features: ArrayView2<'_, f32>) -> Result<Array1<LabelIndex>, PredictError> {
        Ok(self
            .predict_probabilities(features)?
            .mapv(|p| LabelIndex::from(p >= DECISION_THRESHOLD)))
    }

    fn check_width(&self, got: usize) -> Result<(), PredictError> {
        if got != self.meta.n_features {
            return Err(PredictError::FeatureCountMismatch {
                expected: self.meta.n_features,
                got,
            });
        }
        Ok(())
    }

    /// Check arity and, when vocabularies are known, that every value is a
    /// valid category code of its feature.
    fn check_row(&self, row: &[f32]) -> Result<(), PredictError> {
        self.check_width(row.len())?;
        let Some(vocabularies) = &self.meta.vocabularies else {
            return Ok(());
        };
        for (feature, (&value, vocab)) in row.iter().zip(vocabularies).enumerate() {
            let n_categories = vocab.len();
            if value.fract() != 0.0 || value < 0.0 || value >= n_categories as f32 {
                return Err(PredictError::OutOfRange {
                    feature: self.meta.feature_names[feature].clone(),
                    value,
                    n_categories,
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Feature Importance
    // =========================================================================

    /// Compute feature importance.
    ///
    /// Gain/Cover types require node statistics (returns `ExplainError::MissingNodeStats` if missing).
    pub fn feature_importance(&self, importance_type: ImportanceType) -> Result<FeatureImportance, ExplainError> {
        compute_forest_importance(
            &self.forest,
            self.meta.n_features,
            importance_type,
            Some(self.meta.feature_names.clone()),
        )
    }
}

impl Classifier for GBDTModel {
    fn predict(&self, features: &FeatureVector) -> Result<LabelIndex, PredictError> {
        let p = self.predict_proba(features)?;
        Ok(LabelIndex::from(p >= DECISION_THRESHOLD))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<f32, PredictError> {
        self.check_row(features.as_slice())?;
        Ok(LogisticLoss::sigmoid(self.forest.predict_row(features.as_slice())))
    }

    fn to_bytes(&self) -> Result<Vec<u8>, WriteError> {
        persist::to_json_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, ReadError> {
        persist::from_json_bytes(bytes)
    }
}

impl std::fmt::Debug for GBDTModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GBDTModel")
            .field("n_trees", &self.forest.n_trees())
            .field("n_features", &self.meta.n_features)
            .field("task", &self.meta.task)
            .finish()
    }
}
