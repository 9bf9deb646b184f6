//! Canonical forest representation (collection of trees).

use ndarray::{Array1, ArrayView2};

use super::{Tree, TreeValidationError};

/// Error from [`Forest::validate`], naming the offending tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tree {tree}: {source}")]
pub struct ForestValidationError {
    pub tree: usize,
    #[source]
    pub source: TreeValidationError,
}

/// Additive ensemble of regression trees with a single output.
///
/// The raw score of a row is `base_score + sum(tree(row))`. For binary
/// classification this is the log-odds of the positive class.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f32,
}

impl Forest {
    /// Create an empty forest.
    pub fn new(base_score: f32) -> Self {
        Self {
            trees: Vec::new(),
            base_score,
        }
    }

    /// Add a tree to the forest.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Initial prediction before any trees.
    #[inline]
    pub fn base_score(&self) -> f32 {
        self.base_score
    }

    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Raw score for a single row of features.
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.predict_row(features))
    }

    /// Raw scores for a sample-major matrix `[n_samples, n_features]`.
    pub fn predict_margins(&self, features: ArrayView2<'_, f32>) -> Array1<f32> {
        let mut row_buf = Vec::with_capacity(features.ncols());
        features
            .rows()
            .into_iter()
            .map(|row| {
                row_buf.clear();
                row_buf.extend(row.iter().copied());
                self.predict_row(&row_buf)
            })
            .collect()
    }

    /// Validate every tree against the number of input features.
    pub fn validate(&self, n_features: usize) -> Result<(), ForestValidationError> {
        for (tree, t) in self.trees.iter().enumerate() {
            t.validate(n_features)
                .map_err(|source| ForestValidationError { tree, source })?;
        }
        Ok(())
    }
}
