//! Writing and loading the artifact files.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempPath};

use super::error::{io, ArtifactError};
use super::{ArtifactPaths, ArtifactSet, MetricsBundle};
use crate::model::{Classifier, GBDTModel};

/// Write all three artifacts.
///
/// Every payload is serialized and written to a temporary file next to its
/// destination first. Files are renamed into place only once all three temp
/// files are complete, so a failure while writing leaves any previous artifact
/// set untouched.
///
/// The renames happen one at a time. If one fails, the files already renamed
/// are put back from copies taken beforehand (or removed when there was no
/// previous file), so the directory again holds the previous set.
pub fn write_artifacts(paths: &ArtifactPaths, set: &ArtifactSet) -> Result<(), ArtifactError> {
    set.check_consistent()?;

    let model = set.model.to_bytes()?;
    let features = serde_json::to_vec_pretty(&set.feature_names).map_err(|source| ArtifactError::Serialize {
        what: "feature list",
        source,
    })?;
    let metrics = serde_json::to_vec_pretty(&set.metrics).map_err(|source| ArtifactError::Serialize {
        what: "metrics",
        source,
    })?;

    let staged = [
        stage(&paths.model, &model)?,
        stage(&paths.features, &features)?,
        stage(&paths.metrics, &metrics)?,
    ];
    let mut previous = Vec::with_capacity(staged.len());
    for (_, dest) in &staged {
        previous.push(back_up(dest)?);
    }

    let mut replaced = Vec::with_capacity(staged.len());
    for ((tmp, dest), backup) in staged.into_iter().zip(previous) {
        if let Err(e) = tmp.persist(&dest) {
            roll_back(replaced);
            return Err(io(&dest, e.error));
        }
        tracing::debug!(path = %dest.display(), "artifact written");
        replaced.push((dest, backup));
    }
    Ok(())
}

/// Copy an existing destination aside. `None` when there is nothing to keep.
fn back_up(dest: &Path) -> Result<Option<TempPath>, ArtifactError> {
    if !dest.is_file() {
        return Ok(None);
    }
    let dir = parent_dir(dest);
    let backup = NamedTempFile::new_in(dir).map_err(|e| io(dir, e))?.into_temp_path();
    fs::copy(dest, &backup).map_err(|e| io(dest, e))?;
    Ok(Some(backup))
}

/// Undo renames that already happened, newest first.
fn roll_back(replaced: Vec<(PathBuf, Option<TempPath>)>) {
    for (dest, backup) in replaced.into_iter().rev() {
        let restored = match backup {
            Some(backup) => backup.persist(&dest).map_err(|e| e.error),
            None => fs::remove_file(&dest),
        };
        match restored {
            Ok(()) => tracing::debug!(path = %dest.display(), "artifact restored"),
            Err(e) => tracing::warn!(path = %dest.display(), error = %e, "failed to restore artifact"),
        }
    }
}

fn parent_dir(dest: &Path) -> &Path {
    match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn stage(dest: &Path, bytes: &[u8]) -> Result<(NamedTempFile, PathBuf), ArtifactError> {
    let dir = parent_dir(dest);
    fs::create_dir_all(dir).map_err(|e| io(dir, e))?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| io(tmp.path(), e))?;
    tmp.flush().map_err(|e| io(tmp.path(), e))?;
    Ok((tmp, dest.to_path_buf()))
}

/// Load the artifact set.
///
/// Returns `Ok(None)` when any of the three files is absent. Files that exist
/// but fail to parse, or a feature list that disagrees with the model, are
/// errors.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<Option<ArtifactSet>, ArtifactError> {
    let missing: Vec<&Path> = paths.iter().filter(|p| !p.exists()).collect();
    if !missing.is_empty() {
        tracing::info!(?missing, "artifact set incomplete");
        return Ok(None);
    }

    let Some(model_bytes) = read_optional(&paths.model)? else {
        return Ok(None);
    };
    let Some(feature_bytes) = read_optional(&paths.features)? else {
        return Ok(None);
    };
    let Some(metric_bytes) = read_optional(&paths.metrics)? else {
        return Ok(None);
    };

    let model = GBDTModel::from_bytes(&model_bytes).map_err(|source| ArtifactError::ModelRead {
        path: paths.model.clone(),
        source,
    })?;
    let feature_names: Vec<String> = parse_json(&paths.features, &feature_bytes)?;
    let metrics: MetricsBundle = parse_json(&paths.metrics, &metric_bytes)?;

    let set = ArtifactSet {
        model,
        feature_names,
        metrics,
    };
    set.check_consistent()?;

    tracing::info!(
        n_trees = set.model.forest().n_trees(),
        n_features = set.feature_names.len(),
        accuracy = set.metrics.accuracy,
        "artifacts loaded"
    );
    Ok(Some(set))
}

/// Read a file, mapping "not found" to `None` (it may vanish after the
/// existence check).
fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, ArtifactError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io(path, e)),
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, ArtifactError> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}
