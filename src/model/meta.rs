//! Model metadata.
//!
//! Shared metadata types for model introspection. Besides shapes, the metadata
//! carries the encoding context a model was trained with: feature order, the
//! vocabulary of every feature and the label classes.

use serde::{Deserialize, Serialize};

use super::LabelIndex;

/// Type of machine learning task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskKind {
    /// Binary classification (2 classes).
    #[default]
    BinaryClassification,
}

impl TaskKind {
    /// Number of classes the task predicts.
    pub fn n_classes(&self) -> usize {
        match self {
            Self::BinaryClassification => 2,
        }
    }
}

/// Shared metadata for trained models.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Feature names in input order.
    pub feature_names: Vec<String>,
    /// Categories of each feature; position within a vocabulary is the code.
    pub vocabularies: Option<Vec<Vec<String>>>,
    /// Label categories; position is the label index.
    pub label_classes: Option<Vec<String>>,
    /// Number of features.
    pub n_features: usize,
    /// Task type.
    pub task: TaskKind,
    /// Base score (log-odds of the positive class).
    pub base_score: f32,
}

impl ModelMeta {
    /// Create metadata for binary classification with placeholder names `f0..fn`.
    pub fn for_binary_classification(n_features: usize) -> Self {
        Self {
            feature_names: (0..n_features).map(|i| format!("f{i}")).collect(),
            n_features,
            task: TaskKind::BinaryClassification,
            ..Default::default()
        }
    }

    /// Number of categories of `feature`, if vocabularies are known.
    pub fn vocabulary_size(&self, feature: usize) -> Option<usize> {
        self.vocabularies
            .as_ref()
            .and_then(|v| v.get(feature))
            .map(Vec::len)
    }

    /// Label string of `index`, if label classes are known.
    pub fn label_name(&self, index: LabelIndex) -> Option<&str> {
        self.label_classes
            .as_ref()
            .and_then(|c| c.get(index as usize))
            .map(String::as_str)
    }

    /// Label index of the class named `name`.
    pub fn label_index(&self, name: &str) -> Option<LabelIndex> {
        self.label_classes
            .as_ref()?
            .iter()
            .position(|c| c == name)
            .map(|i| i as LabelIndex)
    }
}
