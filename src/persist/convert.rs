//! Conversion between runtime types and schema types.
//!
//! Runtime → schema conversions are infallible `From` impls. Schema → runtime
//! conversions are `TryFrom` and validate shapes, so a hand-edited or
//! truncated file is rejected instead of producing a model that panics at
//! prediction time.

use super::error::ReadError;
use super::schema::{
    ForestSchema, GBDTConfigSchema, GBDTModelSchema, ModelMetaSchema, TaskKindSchema, TreeSchema,
};
use crate::model::gbdt::{RegularizationParams, SamplingParams, TreeParams};
use crate::model::{GBDTConfig, GBDTModel, ModelMeta, TaskKind};
use crate::repr::gbdt::{Forest, Tree};

// =============================================================================
// Meta
// =============================================================================

impl From<TaskKind> for TaskKindSchema {
    fn from(task: TaskKind) -> Self {
        match task {
            TaskKind::BinaryClassification => Self::BinaryClassification,
        }
    }
}

impl From<TaskKindSchema> for TaskKind {
    fn from(task: TaskKindSchema) -> Self {
        match task {
            TaskKindSchema::BinaryClassification => Self::BinaryClassification,
        }
    }
}

impl From<&ModelMeta> for ModelMetaSchema {
    fn from(meta: &ModelMeta) -> Self {
        Self {
            task: meta.task.into(),
            num_features: meta.n_features,
            feature_names: meta.feature_names.clone(),
            vocabularies: meta.vocabularies.clone(),
            label_classes: meta.label_classes.clone(),
        }
    }
}

impl TryFrom<ModelMetaSchema> for ModelMeta {
    type Error = ReadError;

    fn try_from(schema: ModelMetaSchema) -> Result<Self, Self::Error> {
        let n = schema.num_features;
        if schema.feature_names.len() != n {
            return Err(ReadError::Validation(format!(
                "{} feature names for {n} features",
                schema.feature_names.len()
            )));
        }
        if let Some(vocabularies) = &schema.vocabularies {
            if vocabularies.len() != n {
                return Err(ReadError::Validation(format!(
                    "{} vocabularies for {n} features",
                    vocabularies.len()
                )));
            }
        }
        let task: TaskKind = schema.task.into();
        if let Some(classes) = &schema.label_classes {
            if classes.len() != task.n_classes() {
                return Err(ReadError::Validation(format!(
                    "{} label classes for a {}-class task",
                    classes.len(),
                    task.n_classes()
                )));
            }
        }

        Ok(Self {
            feature_names: schema.feature_names,
            vocabularies: schema.vocabularies,
            label_classes: schema.label_classes,
            n_features: n,
            task,
            base_score: 0.0,
        })
    }
}

// =============================================================================
// Tree / Forest
// =============================================================================

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        let to_f64 = |values: &[f32]| values.iter().map(|&v| f64::from(v)).collect::<Vec<_>>();
        // leaves are encoded by a zero left child
        let children_left = tree
            .left_children()
            .iter()
            .zip(tree.leaf_flags())
            .map(|(&left, &leaf)| if leaf { 0 } else { left })
            .collect();

        Self {
            num_nodes: tree.n_nodes() as u32,
            split_indices: tree.split_indices().to_vec(),
            thresholds: to_f64(tree.split_thresholds()),
            children_left,
            children_right: tree.right_children().to_vec(),
            leaf_values: to_f64(tree.leaf_values()),
            gains: tree.gains().map(to_f64),
            covers: tree.covers().map(to_f64),
        }
    }
}

impl TryFrom<TreeSchema> for Tree {
    type Error = ReadError;

    fn try_from(schema: TreeSchema) -> Result<Self, Self::Error> {
        let n_nodes = schema.num_nodes as usize;
        let lengths = [
            ("split_indices", schema.split_indices.len()),
            ("thresholds", schema.thresholds.len()),
            ("children_left", schema.children_left.len()),
            ("children_right", schema.children_right.len()),
            ("leaf_values", schema.leaf_values.len()),
            ("gains", schema.gains.as_ref().map_or(n_nodes, Vec::len)),
            ("covers", schema.covers.as_ref().map_or(n_nodes, Vec::len)),
        ];
        if let Some((field, len)) = lengths.iter().find(|(_, len)| *len != n_nodes) {
            return Err(ReadError::Validation(format!(
                "tree field '{field}' has {len} entries for {n_nodes} nodes"
            )));
        }

        let to_f32 = |values: Vec<f64>| values.into_iter().map(|v| v as f32).collect::<Vec<_>>();
        let is_leaf: Vec<bool> = schema.children_left.iter().map(|&left| left == 0).collect();

        let mut tree = Tree::new(
            schema.split_indices,
            to_f32(schema.thresholds),
            schema.children_left,
            schema.children_right,
            is_leaf,
            to_f32(schema.leaf_values),
        );
        if let Some(gains) = schema.gains {
            tree = tree.with_gains(to_f32(gains));
        }
        if let Some(covers) = schema.covers {
            tree = tree.with_covers(to_f32(covers));
        }
        Ok(tree)
    }
}

impl From<&Forest> for ForestSchema {
    fn from(forest: &Forest) -> Self {
        Self {
            trees: forest.trees().map(TreeSchema::from).collect(),
            base_score: f64::from(forest.base_score()),
        }
    }
}

impl TryFrom<ForestSchema> for Forest {
    type Error = ReadError;

    fn try_from(schema: ForestSchema) -> Result<Self, Self::Error> {
        let mut forest = Forest::new(schema.base_score as f32);
        for tree in schema.trees {
            forest.push_tree(Tree::try_from(tree)?);
        }
        Ok(forest)
    }
}

// =============================================================================
// Config
// =============================================================================

impl From<&GBDTConfig> for GBDTConfigSchema {
    fn from(config: &GBDTConfig) -> Self {
        let reg = &config.regularization;
        Self {
            n_trees: config.n_trees,
            learning_rate: f64::from(config.learning_rate),
            max_depth: config.tree.max_depth,
            lambda: f64::from(reg.lambda),
            alpha: f64::from(reg.alpha),
            min_child_weight: f64::from(reg.min_child_weight),
            min_gain: f64::from(reg.min_gain),
            min_samples_leaf: reg.min_samples_leaf,
            subsample: f64::from(config.sampling.subsample),
            seed: config.seed,
            verbosity: config.verbosity,
        }
    }
}

impl TryFrom<GBDTConfigSchema> for GBDTConfig {
    type Error = ReadError;

    fn try_from(schema: GBDTConfigSchema) -> Result<Self, Self::Error> {
        GBDTConfig::builder()
            .n_trees(schema.n_trees)
            .learning_rate(schema.learning_rate as f32)
            .tree(TreeParams::depth_wise(schema.max_depth))
            .regularization(RegularizationParams {
                lambda: schema.lambda as f32,
                alpha: schema.alpha as f32,
                min_child_weight: schema.min_child_weight as f32,
                min_gain: schema.min_gain as f32,
                min_samples_leaf: schema.min_samples_leaf,
            })
            .sampling(SamplingParams {
                subsample: schema.subsample as f32,
            })
            .seed(schema.seed)
            .verbosity(schema.verbosity)
            .build()
            .map_err(|e| ReadError::Validation(format!("config: {e}")))
    }
}

// =============================================================================
// Model
// =============================================================================

impl From<&GBDTModel> for GBDTModelSchema {
    fn from(model: &GBDTModel) -> Self {
        Self {
            meta: model.meta().into(),
            forest: model.forest().into(),
            config: model.config().into(),
        }
    }
}

impl TryFrom<GBDTModelSchema> for GBDTModel {
    type Error = ReadError;

    fn try_from(schema: GBDTModelSchema) -> Result<Self, Self::Error> {
        let mut meta = ModelMeta::try_from(schema.meta)?;
        let forest = Forest::try_from(schema.forest)?;
        forest
            .validate(meta.n_features)
            .map_err(|e| ReadError::Validation(e.to_string()))?;
        meta.base_score = forest.base_score();
        let config = GBDTConfig::try_from(schema.config)?;
        Ok(GBDTModel::from_parts(forest, meta, config))
    }
}
