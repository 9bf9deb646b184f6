//! Depth-wise tree grower.
//!
//! Grows one regression tree on the current gradients: nodes are expanded
//! breadth-first until `max_depth`, each node's best split is chosen from its
//! histogram, and only the smaller child of every split is histogrammed from
//! rows (the other comes from the subtraction trick).

use std::collections::VecDeque;

use crate::data::BinnedDataset;
use crate::repr::gbdt::{MutableTree, NodeId, Tree};
use crate::training::Gradients;

use super::histograms::NodeHistogram;
use super::partition::{LeafId, RowPartitioner};
use super::split::{find_best_split, GainParams, NodeStats};

/// Parameters for tree growth.
#[derive(Clone, Debug)]
pub struct GrowerParams {
    pub gain: GainParams,
    /// Shrinkage applied to every leaf value.
    pub learning_rate: f32,
    /// Maximum depth; a depth-0 tree is a single leaf.
    pub max_depth: u32,
}

impl Default for GrowerParams {
    fn default() -> Self {
        Self {
            gain: GainParams::default(),
            learning_rate: 0.3,
            max_depth: 6,
        }
    }
}

struct NodeCandidate {
    node: NodeId,
    leaf: LeafId,
    depth: u32,
    histogram: NodeHistogram,
}

/// Grows trees from gradients, reusing its partition buffer across rounds.
pub struct TreeGrower {
    params: GrowerParams,
    partitioner: RowPartitioner,
    /// `(leaf, node)` pairs of the last grown tree.
    leaf_nodes: Vec<(LeafId, NodeId)>,
}

impl TreeGrower {
    pub fn new(params: GrowerParams) -> Self {
        Self {
            params,
            partitioner: RowPartitioner::new(),
            leaf_nodes: Vec::new(),
        }
    }

    #[inline]
    pub fn params(&self) -> &GrowerParams {
        &self.params
    }

    /// Grow one tree over all rows, or only `sampled` rows when given.
    ///
    /// Leaf values are already scaled by the learning rate. Every node records
    /// its cover (hessian sum); split nodes also record their gain.
    pub fn grow(
        &mut self,
        dataset: &BinnedDataset,
        gradients: &Gradients,
        sampled: Option<&[u32]>,
    ) -> MutableTree {
        self.partitioner.reset(dataset.n_samples(), sampled);
        self.leaf_nodes.clear();

        let mut tree = MutableTree::new();
        let root = tree.init_root();
        let root_hist = NodeHistogram::build(dataset, gradients, self.partitioner.rows(0));

        let mut queue = VecDeque::from([NodeCandidate {
            node: root,
            leaf: 0,
            depth: 0,
            histogram: root_hist,
        }]);

        while let Some(cand) = queue.pop_front() {
            let stats = cand.histogram.totals();
            tree.set_cover(cand.node, stats.hess as f32);

            let split = if cand.depth < self.params.max_depth {
                find_best_split(&cand.histogram, stats, &self.params.gain)
            } else {
                None
            };

            let Some(split) = split else {
                self.finish_leaf(&mut tree, cand.node, cand.leaf, stats);
                continue;
            };

            let (left_node, right_node) =
                tree.apply_split(cand.node, split.feature, split.threshold, split.gain);
            let right_leaf = self.partitioner.split(cand.leaf, split.feature, split.bin, dataset);

            let (left_hist, right_hist) = if split.left.count <= split.right.count {
                let small = NodeHistogram::build(dataset, gradients, self.partitioner.rows(cand.leaf));
                let large = NodeHistogram::subtract(&cand.histogram, &small);
                (small, large)
            } else {
                let small = NodeHistogram::build(dataset, gradients, self.partitioner.rows(right_leaf));
                let large = NodeHistogram::subtract(&cand.histogram, &small);
                (large, small)
            };

            queue.push_back(NodeCandidate {
                node: left_node,
                leaf: cand.leaf,
                depth: cand.depth + 1,
                histogram: left_hist,
            });
            queue.push_back(NodeCandidate {
                node: right_node,
                leaf: right_leaf,
                depth: cand.depth + 1,
                histogram: right_hist,
            });
        }

        tree.apply_learning_rate(self.params.learning_rate);
        tree
    }

    fn finish_leaf(&mut self, tree: &mut MutableTree, node: NodeId, leaf: LeafId, stats: NodeStats) {
        tree.make_leaf(node, self.params.gain.leaf_weight(stats));
        self.leaf_nodes.push((leaf, node));
    }

    /// Add the last grown tree's leaf values to `predictions` for the rows it
    /// was trained on.
    ///
    /// Only covers every row when the tree was grown without sampling.
    pub fn update_predictions_from_last_tree(&self, tree: &Tree, predictions: &mut [f32]) {
        for &(leaf, node) in &self.leaf_nodes {
            let value = tree.leaf_value(node);
            for &row in self.partitioner.rows(leaf) {
                predictions[row as usize] += value;
            }
        }
    }
}
