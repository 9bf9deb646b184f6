//! Application configuration.
//!
//! Loads [`AppConfig`] from a YAML file, falling back to defaults for every
//! missing field. Both binaries run with no file at all.
//!
//! ```yaml
//! data:
//!   source: data/agaricus-lepiota.data
//! training:
//!   n_trees: 200
//! serve:
//!   listen_addr: "0.0.0.0:8080"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::explainability::ImportanceType;
use crate::model::gbdt::{ConfigError, SamplingParams, TreeParams};
use crate::model::GBDTConfig;
use crate::training::Verbosity;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "MYCOBOOST_CONFIG";

/// Errors loading the application config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config YAML {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid training config: {0}")]
    Training(#[from] ConfigError),

    #[error("test_fraction must be in (0, 1), got {0}")]
    InvalidTestFraction(f64),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data: DataConfig,
    pub artifacts: ArtifactsConfig,
    pub training: TrainingConfig,
    pub serve: ServeConfig,
}

/// Dataset locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// File the trainer reads. Headered CSV or headerless UCI data.
    pub source: PathBuf,
    /// Headered CSV the dashboard previews. The trainer writes it when it
    /// differs from `source`.
    pub preview: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/mushrooms.csv"),
            preview: PathBuf::from("data/mushrooms.csv"),
        }
    }
}

/// Where the artifact files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactsConfig {
    pub dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from(".") }
    }
}

/// Split and boosting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Held-out fraction. Default: 0.3.
    pub test_fraction: f64,
    /// Seed for the split and row sampling. Default: 42.
    pub seed: u64,
    /// Default: 100.
    pub n_trees: u32,
    /// Default: 0.1.
    pub learning_rate: f32,
    /// Default: 3.
    pub max_depth: u32,
    /// Default: 1.0 (no sampling).
    pub subsample: f32,
    /// Per-round progress logging. Default: `info`.
    pub verbosity: Verbosity,
    /// Statistic stored as `feature_importance` in the metrics. Default: `gain`.
    pub importance: ImportanceType,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.3,
            seed: 42,
            n_trees: 100,
            learning_rate: 0.1,
            max_depth: 3,
            subsample: 1.0,
            verbosity: Verbosity::Info,
            importance: ImportanceType::Gain,
        }
    }
}

impl TrainingConfig {
    /// The model configuration these settings describe.
    pub fn gbdt_config(&self) -> Result<GBDTConfig, ConfigError> {
        GBDTConfig::builder()
            .n_trees(self.n_trees)
            .learning_rate(self.learning_rate)
            .tree(TreeParams::depth_wise(self.max_depth))
            .sampling(SamplingParams {
                subsample: self.subsample,
            })
            .seed(self.seed)
            .verbosity(self.verbosity)
            .build()
    }
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    /// Default: `127.0.0.1:8501`.
    pub listen_addr: String,
    /// Rows shown by the dataset view. Default: 100.
    pub preview_rows: usize,
    /// Bars in the importance chart. Default: 10.
    pub top_features: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8501".to_owned(),
            preview_rows: 100,
            top_features: 10,
        }
    }
}

impl AppConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the file named by [`CONFIG_ENV`], else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        match path {
            Some(path) => Self::load(path),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => Self::load(Path::new(&path)),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let fraction = self.training.test_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(ConfigLoadError::InvalidTestFraction(fraction));
        }
        self.training.gbdt_config()?;
        Ok(())
    }
}
