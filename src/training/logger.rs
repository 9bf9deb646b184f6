//! Training progress logging.
//!
//! [`TrainingLogger`] turns boosting progress into `tracing` events, gated by a
//! [`Verbosity`] level so library users can silence training output without
//! touching their subscriber.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// How much the trainer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Nothing.
    #[default]
    Silent,
    /// Warnings only.
    Warning,
    /// Start/finish and per-round metrics.
    Info,
    /// Everything, including per-tree shape.
    Debug,
}

/// Emits training progress as `tracing` events.
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    n_rounds: usize,
    started: Option<Instant>,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            n_rounds: 0,
            started: None,
        }
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn start_training(&mut self, n_rounds: usize) {
        self.n_rounds = n_rounds;
        self.started = Some(Instant::now());
        if self.verbosity >= Verbosity::Info {
            tracing::info!(n_rounds, "training started");
        }
    }

    /// Log metric values after `round` (0-based).
    pub fn log_metrics(&self, round: usize, metrics: &[(&'static str, f64)]) {
        if self.verbosity < Verbosity::Info || metrics.is_empty() {
            return;
        }
        let summary = metrics
            .iter()
            .map(|(name, value)| format!("{name}={value:.5}"))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(round = round + 1, of = self.n_rounds, "{summary}");
    }

    pub fn log_tree(&self, round: usize, n_nodes: usize, n_leaves: usize) {
        if self.verbosity >= Verbosity::Debug {
            tracing::debug!(round = round + 1, n_nodes, n_leaves, "tree grown");
        }
    }

    pub fn finish_training(&self, n_trees: usize) {
        if self.verbosity >= Verbosity::Info {
            let elapsed_ms = self.started.map_or(0, |t| t.elapsed().as_millis() as u64);
            tracing::info!(n_trees, elapsed_ms, "training finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_is_ordered() {
        assert!(Verbosity::Silent < Verbosity::Warning);
        assert!(Verbosity::Warning < Verbosity::Info);
        assert!(Verbosity::Info < Verbosity::Debug);
        assert_eq!(Verbosity::default(), Verbosity::Silent);
    }

    #[test]
    fn verbosity_deserializes_lowercase() {
        let v: Verbosity = serde_json::from_str("\"info\"").unwrap();
        assert_eq!(v, Verbosity::Info);
    }
}
