//! The batch training run.
//!
//! Load → encode → split → train → evaluate → write artifacts. Any failure
//! aborts the run before the artifact files are touched.

use crate::artifacts::{write_artifacts, ArtifactError, ArtifactPaths, ArtifactSet, MetricsBundle};
use crate::config::AppConfig;
use crate::data::io::{load_table, write_table, DatasetLoadError};
use crate::data::{
    train_test_split, BinnedDataset, BinningError, Dataset, DatasetError, EncodeError, TableEncoder,
    SplitError, TARGET_COLUMN,
};
use crate::explainability::{ExplainError, ImportanceType};
use crate::model::gbdt::ConfigError;
use crate::model::{GBDTModel, LabelIndex, PredictError};
use crate::training::{Accuracy, ClassificationReport, TrainError};

/// Model type recorded in the metrics artifact.
pub const MODEL_TYPE: &str = "Gradient Boosting Classifier";

/// Errors aborting a training run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] DatasetLoadError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Binning(#[from] BinningError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("training failed: {0}")]
    Train(#[from] TrainError),

    #[error("evaluation failed: {0}")]
    Predict(#[from] PredictError),

    #[error(transparent)]
    Explain(#[from] ExplainError),

    #[error(transparent)]
    Artifacts(#[from] ArtifactError),
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub artifacts: ArtifactSet,
    pub paths: ArtifactPaths,
    pub n_train: usize,
    pub n_test: usize,
}

/// Run the full training pipeline and write the artifact set.
pub fn run_training(config: &AppConfig) -> Result<TrainingSummary, PipelineError> {
    let source = &config.data.source;
    tracing::info!(path = %source.display(), "loading dataset");
    let table = load_table(source)?;
    tracing::info!(rows = table.n_rows(), columns = table.n_columns(), "dataset loaded");

    if config.data.preview != *source {
        write_table(&table, &config.data.preview)?;
        tracing::info!(path = %config.data.preview.display(), "dataset saved");
    }

    let (encoder, encoded) = TableEncoder::fit_transform(&table)?;
    let dataset = Dataset::from_encoded(&encoded, &encoder, TARGET_COLUMN)?;

    let training = &config.training;
    let split = train_test_split(dataset.n_samples(), training.test_fraction, training.seed)?;
    let (train, test) = dataset.split(&split)?;
    tracing::info!(train = train.n_samples(), test = test.n_samples(), "split dataset");

    let gbdt_config = training.gbdt_config()?;
    tracing::info!(
        n_trees = gbdt_config.n_trees,
        learning_rate = gbdt_config.learning_rate,
        max_depth = gbdt_config.tree.max_depth,
        "training gradient boosting classifier"
    );
    let binned = BinnedDataset::from_dataset(&train)?;
    let model = GBDTModel::train(&binned, train.labels(), gbdt_config)?
        .with_feature_names(dataset.feature_names().to_vec())
        .with_vocabularies(
            dataset
                .feature_names()
                .iter()
                .map(|name| encoder_classes(&encoder, name))
                .collect::<Result<_, _>>()?,
        )
        .with_label_classes(encoder_classes(&encoder, TARGET_COLUMN)?);

    tracing::info!("evaluating model");
    let metrics = evaluate(&model, &test, training.importance)?;
    tracing::info!(accuracy = metrics.accuracy, "evaluation finished");

    let paths = ArtifactPaths::in_dir(&config.artifacts.dir);
    let artifacts = ArtifactSet {
        feature_names: model.meta().feature_names.clone(),
        model,
        metrics,
    };
    write_artifacts(&paths, &artifacts)?;
    tracing::info!(dir = %config.artifacts.dir.display(), "model, features and metrics saved");

    Ok(TrainingSummary {
        artifacts,
        paths,
        n_train: train.n_samples(),
        n_test: test.n_samples(),
    })
}

fn encoder_classes(encoder: &TableEncoder, column: &str) -> Result<Vec<String>, DatasetError> {
    encoder
        .column(column)
        .map(|c| c.classes().to_vec())
        .ok_or_else(|| DatasetError::MissingEncoder(column.to_owned()))
}

/// Score `model` on a held-out dataset.
///
/// Accuracy and the classification report come from the held-out labels;
/// importance is the model's `importance_type` statistic, normalized.
pub fn evaluate(
    model: &GBDTModel,
    held_out: &Dataset,
    importance_type: ImportanceType,
) -> Result<MetricsBundle, PipelineError> {
    let predicted = model.predict_labels(held_out.features())?.to_vec();
    let actual: Vec<LabelIndex> = held_out.labels().iter().map(|&l| l as LabelIndex).collect();

    let accuracy = Accuracy::score_labels(&predicted, &actual);
    let label_names = match &model.meta().label_classes {
        Some(classes) => classes.clone(),
        None => vec!["0".to_owned(), "1".to_owned()],
    };
    let report = ClassificationReport::compute(&predicted, &actual, &label_names);
    let importance = model.feature_importance(importance_type)?;

    Ok(MetricsBundle::new(accuracy, MODEL_TYPE, &importance, Some(report)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawTable;
    use std::path::Path;

    /// Label is `p` exactly when odor is `f`; `habitat` is noise.
    fn write_fixture(path: &Path) {
        let odors = ["a", "f", "n", "f", "l", "f"];
        let habitats = ["g", "u", "d"];
        let rows = (0..120).map(|i| {
            let odor = odors[i % odors.len()];
            let class = if odor == "f" { "p" } else { "e" };
            [class, odor, habitats[i % habitats.len()]]
        });
        let table = RawTable::from_rows(&["class", "odor", "habitat"], rows);
        write_table(&table, path).unwrap();
    }

    fn config(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.source = dir.join("mushrooms.csv");
        config.data.preview = dir.join("mushrooms.csv");
        config.artifacts.dir = dir.join("artifacts");
        config.training.n_trees = 10;
        config
    }

    #[test]
    fn run_writes_consistent_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(&dir.path().join("mushrooms.csv"));

        let summary = run_training(&config(dir.path())).unwrap();

        assert_eq!(summary.n_train + summary.n_test, 120);
        assert_eq!(summary.n_test, 36);
        assert!(summary.paths.iter().all(Path::exists));

        let set = &summary.artifacts;
        assert_eq!(set.feature_names, vec!["odor", "habitat"]);
        assert_eq!(set.metrics.accuracy, 1.0);
        assert_eq!(set.metrics.model_type, MODEL_TYPE);
        assert_eq!(set.top_features(1)[0].0, "odor");
        assert_eq!(set.model.meta().label_classes.as_deref(), Some(&["e".to_string(), "p".to_string()][..]));
        assert_eq!(set.model.meta().vocabulary_size(0), Some(4));
    }

    #[test]
    fn importance_type_comes_from_config() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(&dir.path().join("mushrooms.csv"));
        let mut config = config(dir.path());
        config.training.importance = ImportanceType::Split;

        let set = run_training(&config).unwrap().artifacts;

        let split = set.model.feature_importance(ImportanceType::Split).unwrap();
        let expected = MetricsBundle::new(0.0, MODEL_TYPE, &split, None).feature_importance;
        assert_eq!(set.metrics.feature_importance, expected);
    }

    #[test]
    fn missing_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        let err = run_training(&config).unwrap_err();
        assert!(matches!(err, PipelineError::Load(ref e) if e.is_not_found()));
        assert!(!config.artifacts.dir.exists());
    }

    #[test]
    fn preview_copy_is_written_for_other_sources() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(&dir.path().join("raw.csv"));
        let mut config = config(dir.path());
        config.data.source = dir.path().join("raw.csv");
        config.data.preview = dir.path().join("data").join("mushrooms.csv");

        run_training(&config).unwrap();
        let preview = load_table(&config.data.preview).unwrap();
        assert_eq!(preview.n_rows(), 120);
        assert_eq!(preview.column_names()[0], TARGET_COLUMN);
    }
}
