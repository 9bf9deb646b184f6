//! The capability interface every trained classifier provides.

use crate::persist::{ReadError, WriteError};

/// Index of a predicted class.
pub type LabelIndex = u32;

/// One sample's encoded feature values, in the model's feature order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// A vector of category codes.
    pub fn from_codes(codes: &[u32]) -> Self {
        Self(codes.iter().map(|&c| c as f32).collect())
    }

    /// All-zero vector of `n_features` values.
    pub fn zeros(n_features: usize) -> Self {
        Self(vec![0.0; n_features])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Errors raised when the input does not fit the model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("model expects {expected} features, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },

    #[error("feature '{feature}' has {n_categories} categories, {value} is out of range")]
    OutOfRange {
        feature: String,
        value: f32,
        n_categories: usize,
    },
}

/// A binary classifier over encoded feature vectors.
///
/// The concrete model is an implementation detail: anything that predicts a
/// label index and round-trips through bytes can sit behind this trait.
pub trait Classifier: Sized {
    /// Predicted label index.
    fn predict(&self, features: &FeatureVector) -> Result<LabelIndex, PredictError>;

    /// Probability of label index 1.
    fn predict_proba(&self, features: &FeatureVector) -> Result<f32, PredictError>;

    /// Serialize the model.
    fn to_bytes(&self) -> Result<Vec<u8>, WriteError>;

    /// Deserialize a model written by [`Classifier::to_bytes`].
    fn from_bytes(bytes: &[u8]) -> Result<Self, ReadError>;
}
