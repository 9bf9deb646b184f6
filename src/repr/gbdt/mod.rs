//! Trained tree ensembles.
//!
//! Trees store their nodes as parallel arrays indexed by [`NodeId`].

/// Index of a node inside a [`Tree`].
pub type NodeId = u32;

pub mod forest;
pub mod tree;

pub use forest::Forest;
pub use tree::{MutableTree, Tree, TreeValidationError};
