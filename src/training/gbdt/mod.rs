//! Gradient Boosted Decision Tree (GBDT) training.
//!
//! - [`grower`]: depth-wise tree growing
//! - [`histograms`]: per-node gradient histograms
//! - [`partition`]: row index partitioning for tree nodes
//! - [`split`]: gain computation and split search
//! - [`trainer`]: boosting loop

pub mod grower;
pub mod histograms;
pub mod partition;
pub mod split;
pub mod trainer;

pub use grower::{GrowerParams, TreeGrower};
pub use histograms::{FeatureHistogram, HistogramBin, NodeHistogram};
pub use partition::{LeafId, RowPartitioner};
pub use split::{find_best_split, GainParams, NodeStats, SplitInfo};
pub use trainer::{GBDTParams, GBDTTrainer, TrainError};
