//! Artifact files produced by a real training run.

mod common;

use std::fs;

use mycoboost::artifacts::{load_artifacts, ArtifactError, ArtifactPaths, FEATURES_FILE, METRICS_FILE, MODEL_FILE};
use mycoboost::data::io::load_table;
use mycoboost::data::{Dataset, TableEncoder, TARGET_COLUMN};
use mycoboost::model::{Classifier, FeatureVector};
use mycoboost::persist::ReadError;
use mycoboost::pipeline::run_training;

fn trained(dir: &std::path::Path) -> ArtifactPaths {
    common::write_mushrooms(&dir.join("mushrooms.csv"), 300, 11);
    let mut config = common::config_in(dir);
    config.training.n_trees = 20;
    run_training(&config).unwrap().paths
}

#[test]
fn file_names_are_fixed() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained(dir.path());

    let artifacts = dir.path().join("artifacts");
    assert_eq!(paths.model, artifacts.join(MODEL_FILE));
    assert_eq!(paths.features, artifacts.join(FEATURES_FILE));
    assert_eq!(paths.metrics, artifacts.join(METRICS_FILE));
    assert!(paths.iter().all(|p| p.is_file()));
}

#[test]
fn reloaded_model_predicts_like_the_trained_one() {
    let dir = tempfile::tempdir().unwrap();
    common::write_mushrooms(&dir.path().join("mushrooms.csv"), 300, 11);
    let mut config = common::config_in(dir.path());
    config.training.n_trees = 20;
    let summary = run_training(&config).unwrap();

    let loaded = load_artifacts(&summary.paths).unwrap().expect("artifacts written");
    assert_eq!(loaded, summary.artifacts);

    let table = load_table(&config.data.source).unwrap();
    let (encoder, encoded) = TableEncoder::fit_transform(&table).unwrap();
    let dataset = Dataset::from_encoded(&encoded, &encoder, TARGET_COLUMN).unwrap();
    for row in dataset.features().rows() {
        let fv = FeatureVector::new(row.to_vec());
        assert_eq!(
            loaded.model.predict(&fv).unwrap(),
            summary.artifacts.model.predict(&fv).unwrap()
        );
    }
}

#[test]
fn metrics_file_uses_display_keys() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained(dir.path());

    let json: serde_json::Value = serde_json::from_slice(&fs::read(&paths.metrics).unwrap()).unwrap();
    let accuracy = json["Accuracy"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
    assert_eq!(json["Model Type"], "Gradient Boosting Classifier");
    assert_eq!(json["feature_importance"].as_object().unwrap().len(), 22);
}

#[test]
fn newer_format_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained(dir.path());

    let mut json: serde_json::Value = serde_json::from_slice(&fs::read(&paths.model).unwrap()).unwrap();
    json["format_version"] = serde_json::json!(99);
    fs::write(&paths.model, serde_json::to_vec(&json).unwrap()).unwrap();

    match load_artifacts(&paths) {
        Err(ArtifactError::ModelRead {
            source: ReadError::UnsupportedVersion { found: 99, .. },
            ..
        }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn retraining_replaces_the_set() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained(dir.path());
    let first = fs::read(&paths.model).unwrap();

    common::write_mushrooms(&dir.path().join("mushrooms.csv"), 300, 12);
    let mut config = common::config_in(dir.path());
    config.training.n_trees = 20;
    run_training(&config).unwrap();

    assert_ne!(fs::read(&paths.model).unwrap(), first);
    assert!(load_artifacts(&paths).unwrap().is_some());
    let leftovers = fs::read_dir(dir.path().join("artifacts")).unwrap().count();
    assert_eq!(leftovers, 3);
}
