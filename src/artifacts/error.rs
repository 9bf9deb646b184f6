use std::io;
use std::path::{Path, PathBuf};

use crate::persist::{ReadError, WriteError};

/// Errors reading or writing the artifact set.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load model from {path}: {source}")]
    ModelRead {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("failed to serialize model: {0}")]
    ModelWrite(#[from] WriteError),

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature list {listed:?} does not match the model's features {model:?}")]
    FeatureMismatch { listed: Vec<String>, model: Vec<String> },
}

pub(super) fn io(path: &Path, source: io::Error) -> ArtifactError {
    ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    }
}
