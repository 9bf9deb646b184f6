//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;

use mycoboost::config::AppConfig;
use mycoboost::data::io::write_table;
use mycoboost::data::{RawTable, MUSHROOM_COLUMNS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Category alphabets of the UCI attributes, in [`MUSHROOM_COLUMNS`] order
/// after `class`.
const ALPHABETS: [&[&str]; 22] = [
    &["b", "c", "f", "k", "s", "x"],
    &["f", "g", "s", "y"],
    &["b", "c", "e", "g", "n", "p", "r", "u", "w", "y"],
    &["f", "t"],
    &["a", "c", "f", "l", "m", "n", "p", "s", "y"],
    &["a", "f"],
    &["c", "w"],
    &["b", "n"],
    &["b", "e", "g", "h", "k", "n", "o", "p", "r", "u", "w", "y"],
    &["e", "t"],
    &["?", "b", "c", "e", "r"],
    &["f", "k", "s", "y"],
    &["f", "k", "s", "y"],
    &["b", "c", "e", "g", "n", "o", "p", "w", "y"],
    &["b", "c", "e", "g", "n", "o", "p", "w", "y"],
    &["p"],
    &["n", "o", "w", "y"],
    &["n", "o", "t"],
    &["e", "f", "l", "n", "p"],
    &["b", "h", "k", "n", "o", "r", "u", "w", "y"],
    &["a", "c", "n", "s", "v", "y"],
    &["d", "g", "l", "m", "p", "u", "w"],
];

/// Position of `odor` among the attributes.
pub const ODOR: usize = 4;

/// Odors of edible mushrooms; every other odor is poisonous.
const EDIBLE_ODORS: [&str; 3] = ["a", "l", "n"];

/// A mushroom-shaped table whose label is decided by `odor` alone.
///
/// Every other attribute is drawn uniformly from its alphabet. The same
/// `(n_rows, seed)` always yields the same table.
pub fn synthetic_mushrooms(n_rows: usize, seed: u64) -> RawTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows: Vec<Vec<String>> = (0..n_rows)
        .map(|_| {
            let attributes: Vec<&str> = ALPHABETS
                .iter()
                .map(|alphabet| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();
            let class = if EDIBLE_ODORS.contains(&attributes[ODOR]) { "e" } else { "p" };
            std::iter::once(class)
                .chain(attributes)
                .map(str::to_owned)
                .collect()
        })
        .collect();
    RawTable::from_rows(&MUSHROOM_COLUMNS, rows)
}

/// Write [`synthetic_mushrooms`] as a CSV with a header row.
pub fn write_mushrooms(path: &Path, n_rows: usize, seed: u64) {
    write_table(&synthetic_mushrooms(n_rows, seed), path).unwrap();
}

/// Config reading `dir/mushrooms.csv` and writing artifacts to `dir/artifacts`.
pub fn config_in(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.data.source = dir.join("mushrooms.csv");
    config.data.preview = dir.join("mushrooms.csv");
    config.artifacts.dir = dir.join("artifacts");
    config
}
