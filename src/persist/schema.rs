//! Schema types for model serialization.
//!
//! These types provide a stable serialization format independent of runtime
//! types, so the runtime structs can change without breaking saved models.

use serde::{Deserialize, Serialize};

use crate::training::Verbosity;

/// Task type for model output interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKindSchema {
    BinaryClassification,
}

/// Model metadata schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetaSchema {
    pub task: TaskKindSchema,
    pub num_features: usize,
    /// Feature names in input order.
    pub feature_names: Vec<String>,
    /// Category vocabulary of every feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabularies: Option<Vec<Vec<String>>>,
    /// Label categories, position = label index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_classes: Option<Vec<String>>,
}

/// Tree schema (SoA layout).
///
/// A node is a leaf when its left child is 0; the root is never a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSchema {
    pub num_nodes: u32,
    pub split_indices: Vec<u32>,
    pub thresholds: Vec<f64>,
    pub children_left: Vec<u32>,
    pub children_right: Vec<u32>,
    pub leaf_values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gains: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covers: Option<Vec<f64>>,
}

/// Forest schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestSchema {
    /// Trees in boosting order.
    pub trees: Vec<TreeSchema>,
    pub base_score: f64,
}

/// Training configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GBDTConfigSchema {
    pub n_trees: u32,
    pub learning_rate: f64,
    pub max_depth: u32,
    pub lambda: f64,
    pub alpha: f64,
    pub min_child_weight: f64,
    pub min_gain: f64,
    pub min_samples_leaf: u32,
    pub subsample: f64,
    pub seed: u64,
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Full GBDT model schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GBDTModelSchema {
    pub meta: ModelMetaSchema,
    pub forest: ForestSchema,
    pub config: GBDTConfigSchema,
}

impl GBDTModelSchema {
    /// Model type string.
    pub const MODEL_TYPE: &'static str = "gbdt";
}
