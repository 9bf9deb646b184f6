//! Data handling for the mushroom pipeline.
//!
//! # Overview
//!
//! - [`RawTable`]: named string columns as read from disk
//! - [`TableEncoder`] / [`ColumnEncoder`]: per-column categorical encoding
//! - [`EncodedTable`]: integer codes for every column
//! - [`Dataset`]: feature matrix + binary labels, split into train/test
//! - [`BinnedDataset`]: feature-major bin storage used by the tree grower
//!
//! Loading and writing CSV files lives in [`io`].

mod binned;
mod dataset;
mod encoder;
pub mod io;
mod split;
mod table;

pub use binned::{BinnedDataset, BinningError};
pub use dataset::{Dataset, DatasetError};
pub use encoder::{ColumnEncoder, EncodeError, EncodedTable, TableEncoder};
pub use split::{train_test_split, SplitError, TrainTestSplit};
pub use table::RawTable;

/// Name of the label column.
pub const TARGET_COLUMN: &str = "class";

/// Column names of the UCI mushroom dataset, label first.
///
/// Used when the source file has no header row (`agaricus-lepiota.data`).
pub const MUSHROOM_COLUMNS: [&str; 23] = [
    "class",
    "cap-shape",
    "cap-surface",
    "cap-color",
    "bruises",
    "odor",
    "gill-attachment",
    "gill-spacing",
    "gill-size",
    "gill-color",
    "stalk-shape",
    "stalk-root",
    "stalk-surface-above-ring",
    "stalk-surface-below-ring",
    "stalk-color-above-ring",
    "stalk-color-below-ring",
    "veil-type",
    "veil-color",
    "ring-number",
    "ring-type",
    "spore-print-color",
    "population",
    "habitat",
];
