//! The artifact contract between training and serving.
//!
//! A training run produces three files in one directory:
//!
//! | File | Content |
//! |---|---|
//! | `gradient_boosting_model.json` | versioned model envelope (see [`crate::persist`]) |
//! | `feature_columns.json` | JSON array of feature names, in model input order |
//! | `metrics.json` | [`MetricsBundle`] |
//!
//! The three are only meaningful together. [`load_artifacts`] returns `None`
//! when any is missing and rejects a feature list that does not match the
//! model's own feature names.

mod error;
mod metrics;
mod store;

use std::path::{Path, PathBuf};

pub use error::ArtifactError;
pub use metrics::{MetricsBundle, METRIC_DECIMALS};
pub use store::{load_artifacts, write_artifacts};

use crate::model::GBDTModel;

pub const MODEL_FILE: &str = "gradient_boosting_model.json";
pub const FEATURES_FILE: &str = "feature_columns.json";
pub const METRICS_FILE: &str = "metrics.json";

/// Locations of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub features: PathBuf,
    pub metrics: PathBuf,
}

impl ArtifactPaths {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            features: dir.join(FEATURES_FILE),
            metrics: dir.join(METRICS_FILE),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.model, &self.features, &self.metrics]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// A trained model with its feature list and metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSet {
    pub model: GBDTModel,
    pub feature_names: Vec<String>,
    pub metrics: MetricsBundle,
}

impl ArtifactSet {
    /// The feature list must equal the model's features, same order.
    pub fn check_consistent(&self) -> Result<(), ArtifactError> {
        let model = &self.model.meta().feature_names;
        if &self.feature_names != model {
            return Err(ArtifactError::FeatureMismatch {
                listed: self.feature_names.clone(),
                model: model.clone(),
            });
        }
        Ok(())
    }

    /// The `n` most important features, ties in feature order.
    pub fn top_features(&self, n: usize) -> Vec<(String, f64)> {
        self.metrics.top_features(&self.feature_names, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::explainability::{FeatureImportance, ImportanceType};
    use crate::model::{Classifier, FeatureVector, ModelMeta};
    use crate::repr::gbdt::{Forest, MutableTree};

    fn artifact_set() -> ArtifactSet {
        let mut t = MutableTree::new();
        let root = t.init_root();
        let (l, r) = t.apply_split(root, 1, 0.5, 3.0);
        t.make_leaf(l, -1.5);
        t.make_leaf(r, 2.0);
        let mut forest = Forest::new(0.0);
        forest.push_tree(t.freeze());

        let names: Vec<String> = vec!["odor".into(), "habitat".into()];
        let model = GBDTModel::from_forest(forest, ModelMeta::for_binary_classification(2))
            .with_feature_names(names.clone())
            .with_label_classes(vec!["e".into(), "p".into()]);
        let importance = model.feature_importance(ImportanceType::Gain).unwrap();
        let metrics = MetricsBundle::new(0.99, "Gradient Boosting Classifier", &importance, None);

        ArtifactSet {
            model,
            feature_names: names,
            metrics,
        }
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        let set = artifact_set();

        write_artifacts(&paths, &set).unwrap();
        assert!(paths.iter().all(Path::exists));

        let loaded = load_artifacts(&paths).unwrap().expect("artifacts present");
        assert_eq!(loaded, set);
        let fv = FeatureVector::from_codes(&[0, 1]);
        assert_eq!(loaded.model.predict(&fv).unwrap(), set.model.predict(&fv).unwrap());
        assert_eq!(loaded.top_features(1), vec![("habitat".to_string(), 1.0)]);
    }

    #[test]
    fn feature_file_is_a_name_array() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        write_artifacts(&paths, &artifact_set()).unwrap();

        let names: Vec<String> = serde_json::from_slice(&fs::read(&paths.features).unwrap()).unwrap();
        assert_eq!(names, vec!["odor", "habitat"]);
    }

    #[test]
    fn failed_rename_restores_previous_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        write_artifacts(&paths, &artifact_set()).unwrap();
        fs::write(&paths.model, b"previous model").unwrap();
        fs::write(&paths.features, b"previous features").unwrap();
        // a non-empty directory cannot be replaced by a file
        fs::remove_file(&paths.metrics).unwrap();
        fs::create_dir(&paths.metrics).unwrap();
        fs::write(paths.metrics.join("keep"), b"x").unwrap();

        assert!(matches!(
            write_artifacts(&paths, &artifact_set()),
            Err(ArtifactError::Io { .. })
        ));
        assert_eq!(fs::read(&paths.model).unwrap(), b"previous model");
        assert_eq!(fs::read(&paths.features).unwrap(), b"previous features");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn failed_first_write_leaves_no_partial_set() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        fs::create_dir_all(paths.metrics.join("keep")).unwrap();

        assert!(write_artifacts(&paths, &artifact_set()).is_err());
        assert!(!paths.model.exists());
        assert!(!paths.features.exists());
    }

    #[test]
    fn missing_files_mean_no_model() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        assert!(load_artifacts(&paths).unwrap().is_none());

        write_artifacts(&paths, &artifact_set()).unwrap();
        fs::remove_file(&paths.metrics).unwrap();
        assert!(load_artifacts(&paths).unwrap().is_none());
    }

    #[test]
    fn reordered_feature_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        write_artifacts(&paths, &artifact_set()).unwrap();
        fs::write(&paths.features, r#"["habitat", "odor"]"#).unwrap();

        assert!(matches!(
            load_artifacts(&paths),
            Err(ArtifactError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn inconsistent_set_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        let mut set = artifact_set();
        set.feature_names.pop();

        assert!(write_artifacts(&paths, &set).is_err());
        assert!(!paths.iter().any(Path::exists));
    }

    #[test]
    fn corrupt_metrics_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        write_artifacts(&paths, &artifact_set()).unwrap();
        fs::write(&paths.metrics, "{").unwrap();

        let err = load_artifacts(&paths).unwrap_err();
        assert!(matches!(err, ArtifactError::Json { .. }));
        assert!(err.to_string().contains(METRICS_FILE));
    }

    #[test]
    fn unlisted_names_score_zero() {
        let set = artifact_set();
        let importance = FeatureImportance::new(vec![0.0, 0.0], None, ImportanceType::Gain);
        let metrics = MetricsBundle::new(1.0, "x", &importance, None);
        assert_eq!(metrics.top_features(&set.feature_names, 2)[0].1, 0.0);
    }
}
