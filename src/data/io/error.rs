//! Shared error types for dataset I/O.

use std::io;
use std::path::PathBuf;

/// Errors that can occur when loading or writing a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetLoadError {
	#[error("I/O error on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("Arrow error: {0}")]
	Arrow(#[from] arrow::error::ArrowError),

	#[error("dataset is empty: {0}")]
	Empty(PathBuf),

	#[error("unsupported column type for {column}: expected {expected}, got {got}")]
	UnsupportedType {
		column: String,
		expected: String,
		got: String,
	},

	#[error("missing value in column {column}, row {row}")]
	MissingValue { column: String, row: usize },
}

impl DatasetLoadError {
	pub(super) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}

	/// True when the underlying cause is a missing file.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
	}
}
