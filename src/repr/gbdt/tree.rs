//! Decision trees stored as parallel node arrays.
//!
//! Node `i` of a tree is described by position `i` of every array.
//!
//! - [`Tree`]: immutable SoA storage used for prediction and persistence
//! - [`MutableTree`]: placeholder-based builder used while growing a tree
//!
//! Every split is numeric: a row goes left when `value < threshold`. Category
//! codes are compared as ordinal values, so a threshold of `2.5` sends codes
//! `{0, 1, 2}` left.

use super::NodeId;
use crate::data::BinnedDataset;

// ============================================================================
// TreeValidationError
// ============================================================================

/// Why a [`Tree`] is not a well-formed binary tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    #[error("tree has no nodes")]
    EmptyTree,

    #[error("node {node}: {side} child {child} out of bounds for {n_nodes} nodes")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },

    #[error("node {node} references itself")]
    SelfLoop { node: NodeId },

    #[error("node {node} reached by more than one path")]
    DuplicateVisit { node: NodeId },

    #[error("node {node} is not reachable from the root")]
    UnreachableNode { node: NodeId },

    #[error("node {node} splits on feature {feature}, model has {n_features} features")]
    FeatureOutOfBounds {
        node: NodeId,
        feature: u32,
        n_features: usize,
    },

    #[error("per-node array '{field}' has length {len}, expected {n_nodes}")]
    LengthMismatch {
        field: &'static str,
        len: usize,
        n_nodes: usize,
    },
}

// ============================================================================
// Tree
// ============================================================================

/// Structure-of-Arrays tree storage.
///
/// Child indices are local to this tree (0 = root). Split statistics (`gains`,
/// `covers`) are optional and only meaningful on split nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f32]>,
    left_children: Box<[u32]>,
    right_children: Box<[u32]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[f32]>,
    gains: Option<Box<[f32]>>,
    covers: Option<Box<[f32]>>,
}

impl Tree {
    /// Assemble a tree from its node arrays.
    ///
    /// All arrays must have the same length (number of nodes).
    pub fn new(
        split_indices: Vec<u32>,
        split_thresholds: Vec<f32>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f32>,
    ) -> Self {
        let n_nodes = split_indices.len();
        debug_assert_eq!(n_nodes, split_thresholds.len());
        debug_assert_eq!(n_nodes, left_children.len());
        debug_assert_eq!(n_nodes, right_children.len());
        debug_assert_eq!(n_nodes, is_leaf.len());
        debug_assert_eq!(n_nodes, leaf_values.len());

        Self {
            split_indices: split_indices.into_boxed_slice(),
            split_thresholds: split_thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
            gains: None,
            covers: None,
        }
    }

    /// Attach per-node split gains.
    pub fn with_gains(mut self, gains: Vec<f32>) -> Self {
        self.gains = Some(gains.into_boxed_slice());
        self
    }

    /// Attach per-node covers (hessian sums).
    pub fn with_covers(mut self, covers: Vec<f32>) -> Self {
        self.covers = Some(covers.into_boxed_slice());
        self
    }

    /// Total node count, leaves included.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&l| l).count()
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f32 {
        self.split_thresholds[node as usize]
    }

    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_values[node as usize]
    }

    /// Split gain of `node`, if gains were recorded.
    #[inline]
    pub fn gain(&self, node: NodeId) -> Option<f32> {
        self.gains.as_ref().map(|g| g[node as usize])
    }

    /// Cover of `node`, if covers were recorded.
    #[inline]
    pub fn cover(&self, node: NodeId) -> Option<f32> {
        self.covers.as_ref().map(|c| c[node as usize])
    }

    // Raw arrays, used by the persistence layer.

    pub fn split_indices(&self) -> &[u32] {
        &self.split_indices
    }

    pub fn split_thresholds(&self) -> &[f32] {
        &self.split_thresholds
    }

    pub fn left_children(&self) -> &[u32] {
        &self.left_children
    }

    pub fn right_children(&self) -> &[u32] {
        &self.right_children
    }

    pub fn leaf_flags(&self) -> &[bool] {
        &self.is_leaf
    }

    pub fn leaf_values(&self) -> &[f32] {
        &self.leaf_values
    }

    pub fn gains(&self) -> Option<&[f32]> {
        self.gains.as_deref()
    }

    pub fn covers(&self) -> Option<&[f32]> {
        self.covers.as_deref()
    }

    /// Traverse the tree and return the leaf node reached by `features`.
    pub fn leaf_for(&self, features: &[f32]) -> NodeId {
        let mut idx: NodeId = 0;
        while !self.is_leaf(idx) {
            let fvalue = features[self.split_index(idx) as usize];
            idx = if fvalue < self.split_threshold(idx) {
                self.left_child(idx)
            } else {
                self.right_child(idx)
            };
        }
        idx
    }

    /// Leaf value reached by `features`.
    #[inline]
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        self.leaf_value(self.leaf_for(features))
    }

    /// Leaf value reached by a row of a binned dataset.
    ///
    /// Bins are category codes, so they compare against thresholds directly.
    pub fn predict_binned_row(&self, dataset: &BinnedDataset, sample: usize) -> f32 {
        let mut idx: NodeId = 0;
        while !self.is_leaf(idx) {
            let bin = dataset.bin(sample, self.split_index(idx) as usize) as f32;
            idx = if bin < self.split_threshold(idx) {
                self.left_child(idx)
            } else {
                self.right_child(idx)
            };
        }
        self.leaf_value(idx)
    }

    /// Validate structural invariants.
    ///
    /// Every node must be reachable from the root exactly once, children must
    /// be in bounds, and split features must be below `n_features`.
    pub fn validate(&self, n_features: usize) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        let lengths = [
            ("split_indices", self.split_indices.len()),
            ("split_thresholds", self.split_thresholds.len()),
            ("left_children", self.left_children.len()),
            ("right_children", self.right_children.len()),
            ("leaf_values", self.leaf_values.len()),
            ("gains", self.gains.as_ref().map_or(n_nodes, |g| g.len())),
            ("covers", self.covers.as_ref().map_or(n_nodes, |c| c.len())),
        ];
        if let Some(&(field, len)) = lengths.iter().find(|(_, len)| *len != n_nodes) {
            return Err(TreeValidationError::LengthMismatch { field, len, n_nodes });
        }

        let mut visited = vec![false; n_nodes];
        let mut stack: Vec<NodeId> = vec![0];

        while let Some(node) = stack.pop() {
            let idx = node as usize;
            if visited[idx] {
                return Err(TreeValidationError::DuplicateVisit { node });
            }
            visited[idx] = true;

            if self.is_leaf(node) {
                continue;
            }

            let feature = self.split_index(node);
            if feature as usize >= n_features {
                return Err(TreeValidationError::FeatureOutOfBounds {
                    node,
                    feature,
                    n_features,
                });
            }

            for (side, child) in [("left", self.left_child(node)), ("right", self.right_child(node))] {
                if child == node {
                    return Err(TreeValidationError::SelfLoop { node });
                }
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
                stack.push(child);
            }
        }

        match visited.iter().position(|&v| !v) {
            Some(i) => Err(TreeValidationError::UnreachableNode { node: i as u32 }),
            None => Ok(()),
        }
    }
}

// =============================================================================
// MutableTree
// =============================================================================

/// A tree under construction by the grower.
///
/// Nodes are allocated first as placeholders and filled in once the grower
/// decides between a split and a leaf.
#[derive(Debug, Clone, Default)]
pub struct MutableTree {
    split_indices: Vec<u32>,
    split_thresholds: Vec<f32>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f32>,
    gains: Vec<f32>,
    covers: Vec<f32>,
}

impl MutableTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset and allocate the root placeholder. Returns the root ID (always 0).
    pub fn init_root(&mut self) -> NodeId {
        self.reset();
        self.allocate_node()
    }

    /// Turn `node` into a split on `feature < threshold` and allocate both children.
    ///
    /// Returns `(left_id, right_id)`.
    pub fn apply_split(
        &mut self,
        node: NodeId,
        feature: u32,
        threshold: f32,
        gain: f32,
    ) -> (NodeId, NodeId) {
        let left_id = self.allocate_node();
        let right_id = self.allocate_node();

        let idx = node as usize;
        self.split_indices[idx] = feature;
        self.split_thresholds[idx] = threshold;
        self.left_children[idx] = left_id;
        self.right_children[idx] = right_id;
        self.is_leaf[idx] = false;
        self.gains[idx] = gain;

        (left_id, right_id)
    }

    /// Record the hessian sum of the samples reaching `node`.
    pub fn set_cover(&mut self, node: NodeId, cover: f32) {
        self.covers[node as usize] = cover;
    }

    /// Turn `node` into a leaf.
    pub fn make_leaf(&mut self, node: NodeId, value: f32) {
        let idx = node as usize;
        self.is_leaf[idx] = true;
        self.leaf_values[idx] = value;
    }

    /// Multiply every leaf value by `learning_rate`.
    pub fn apply_learning_rate(&mut self, learning_rate: f32) {
        for (is_leaf, value) in self.is_leaf.iter().zip(self.leaf_values.iter_mut()) {
            if *is_leaf {
                *value *= learning_rate;
            }
        }
    }

    /// Nodes allocated so far.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.split_indices.len()
    }

    /// Drop all nodes.
    pub fn reset(&mut self) {
        self.split_indices.clear();
        self.split_thresholds.clear();
        self.left_children.clear();
        self.right_children.clear();
        self.is_leaf.clear();
        self.leaf_values.clear();
        self.gains.clear();
        self.covers.clear();
    }

    /// Freeze into an immutable [`Tree`].
    pub fn freeze(self) -> Tree {
        Tree::new(
            self.split_indices,
            self.split_thresholds,
            self.left_children,
            self.right_children,
            self.is_leaf,
            self.leaf_values,
        )
        .with_gains(self.gains)
        .with_covers(self.covers)
    }

    fn allocate_node(&mut self) -> NodeId {
        let id = self.split_indices.len() as NodeId;
        self.split_indices.push(0);
        self.split_thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(true);
        self.leaf_values.push(0.0);
        self.gains.push(0.0);
        self.covers.push(0.0);
        id
    }
}
