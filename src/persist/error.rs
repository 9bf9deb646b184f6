//! Persistence errors.

/// Errors reading a serialized model.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported format version {found} (this build reads version {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("unsupported model type '{0}'")]
    UnsupportedModelType(String),

    #[error("invalid model: {0}")]
    Validation(String),
}

/// Errors serializing a model.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to serialize model: {0}")]
    Json(#[from] serde_json::Error),
}
