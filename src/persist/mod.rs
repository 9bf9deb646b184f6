//! Versioned JSON persistence for trained models.
//!
//! A saved model is a [`ModelEnvelope`]: a format version and model type
//! around the schema types of [`schema`]. Readers check the version before
//! parsing the payload.
//!
//! ```ignore
//! use mycoboost::model::Classifier;
//!
//! let bytes = model.to_bytes()?;
//! let loaded = GBDTModel::from_bytes(&bytes)?;
//! ```

mod convert;
mod error;
pub mod schema;

use serde::{Deserialize, Serialize};

pub use error::{ReadError, WriteError};
use schema::GBDTModelSchema;

use crate::model::GBDTModel;

/// Current format version written by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// Top-level JSON document of a saved model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEnvelope {
    pub format_version: u32,
    pub model_type: String,
    pub model: GBDTModelSchema,
}

/// Version fields only, read before the payload.
#[derive(Deserialize)]
struct EnvelopeHeader {
    format_version: u32,
    model_type: String,
}

impl ModelEnvelope {
    pub fn from_model(model: &GBDTModel) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            model_type: GBDTModelSchema::MODEL_TYPE.to_owned(),
            model: model.into(),
        }
    }

    pub fn into_model(self) -> Result<GBDTModel, ReadError> {
        GBDTModel::try_from(self.model)
    }
}

/// Serialize `model` as pretty-printed JSON.
pub fn to_json_bytes(model: &GBDTModel) -> Result<Vec<u8>, WriteError> {
    Ok(serde_json::to_vec_pretty(&ModelEnvelope::from_model(model))?)
}

/// Parse a model written by [`to_json_bytes`].
pub fn from_json_bytes(bytes: &[u8]) -> Result<GBDTModel, ReadError> {
    let header: EnvelopeHeader = serde_json::from_slice(bytes)?;
    if header.format_version != FORMAT_VERSION {
        return Err(ReadError::UnsupportedVersion {
            found: header.format_version,
            expected: FORMAT_VERSION,
        });
    }
    if header.model_type != GBDTModelSchema::MODEL_TYPE {
        return Err(ReadError::UnsupportedModelType(header.model_type));
    }

    let envelope: ModelEnvelope = serde_json::from_slice(bytes)?;
    envelope.into_model()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classifier, FeatureVector, ModelMeta};
    use crate::repr::gbdt::{Forest, MutableTree};

    fn model() -> GBDTModel {
        let mut t = MutableTree::new();
        let root = t.init_root();
        let (l, r) = t.apply_split(root, 0, 0.5, 1.0);
        t.make_leaf(l, -1.0);
        t.make_leaf(r, 1.0);
        let mut forest = Forest::new(0.0);
        forest.push_tree(t.freeze());
        GBDTModel::from_forest(forest, ModelMeta::for_binary_classification(1))
    }

    #[test]
    fn bytes_round_trip_preserves_predictions() {
        let model = model();
        let bytes = model.to_bytes().unwrap();
        let loaded = GBDTModel::from_bytes(&bytes).unwrap();

        assert_eq!(loaded, model);
        for code in [0, 1] {
            let fv = FeatureVector::from_codes(&[code]);
            assert_eq!(loaded.predict(&fv).unwrap(), model.predict(&fv).unwrap());
        }
    }

    #[test]
    fn envelope_carries_version() {
        let json: serde_json::Value = serde_json::from_slice(&to_json_bytes(&model()).unwrap()).unwrap();
        assert_eq!(json["format_version"], FORMAT_VERSION);
        assert_eq!(json["model_type"], "gbdt");
        assert_eq!(json["model"]["meta"]["feature_names"][0], "f0");
    }

    #[test]
    fn future_version_is_rejected() {
        let mut json: serde_json::Value = serde_json::from_slice(&to_json_bytes(&model()).unwrap()).unwrap();
        json["format_version"] = serde_json::json!(99);
        let err = from_json_bytes(&serde_json::to_vec(&json).unwrap()).unwrap_err();
        assert!(matches!(err, ReadError::UnsupportedVersion { found: 99, expected: 1 }));
    }

    #[test]
    fn wrong_model_type_is_rejected() {
        let mut json: serde_json::Value = serde_json::from_slice(&to_json_bytes(&model()).unwrap()).unwrap();
        json["model_type"] = serde_json::json!("gblinear");
        let err = from_json_bytes(&serde_json::to_vec(&json).unwrap()).unwrap_err();
        assert!(matches!(err, ReadError::UnsupportedModelType(t) if t == "gblinear"));
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(from_json_bytes(b"not json"), Err(ReadError::Json(_))));
    }
}
