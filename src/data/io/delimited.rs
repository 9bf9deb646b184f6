//! Delimited text loader and writer for [`RawTable`].
//!
//! Two layouts are accepted on read:
//! - a header row whose first field is `class` (the stored `mushrooms.csv`)
//! - no header at all (the UCI `agaricus-lepiota.data` file), in which case
//!   [`MUSHROOM_COLUMNS`] names the columns

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use super::error::DatasetLoadError;
use crate::data::{RawTable, MUSHROOM_COLUMNS, TARGET_COLUMN};

const BATCH_SIZE: usize = 1024;

// =============================================================================
// Public API
// =============================================================================

/// Load a CSV file into a [`RawTable`] of string columns.
pub fn load_table(path: impl AsRef<Path>) -> Result<RawTable, DatasetLoadError> {
	let path = path.as_ref();
	let first_line = read_first_line(path)?.ok_or_else(|| DatasetLoadError::Empty(path.to_path_buf()))?;

	let header: Vec<String> = first_line
		.split(',')
		.map(|field| field.trim().trim_matches('"').to_owned())
		.collect();
	let has_header = header.first().map(String::as_str) == Some(TARGET_COLUMN);
	let names: Vec<String> = if has_header {
		header
	} else {
		MUSHROOM_COLUMNS.iter().map(|s| s.to_string()).collect()
	};

	let schema = utf8_schema(&names);
	let file = File::open(path).map_err(|e| DatasetLoadError::io(path, e))?;
	let reader = ReaderBuilder::new(schema)
		.with_header(has_header)
		.with_batch_size(BATCH_SIZE)
		.build(file)?;

	let mut columns: Vec<Vec<String>> = vec![Vec::new(); names.len()];
	let mut n_rows = 0usize;
	for batch in reader {
		let batch = batch?;
		append_batch(&batch, &names, n_rows, &mut columns)?;
		n_rows += batch.num_rows();
	}

	Ok(RawTable::new(names, columns))
}

/// Write `table` as a headered CSV file, creating parent directories.
pub fn write_table(table: &RawTable, path: impl AsRef<Path>) -> Result<(), DatasetLoadError> {
	let path = path.as_ref();
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent).map_err(|e| DatasetLoadError::io(parent, e))?;
	}

	let schema = utf8_schema(table.column_names());
	let arrays: Vec<ArrayRef> = (0..table.n_columns())
		.map(|c| Arc::new(StringArray::from_iter_values(table.column(c).iter())) as ArrayRef)
		.collect();
	let batch = RecordBatch::try_new(schema, arrays)?;

	let file = File::create(path).map_err(|e| DatasetLoadError::io(path, e))?;
	let mut writer = WriterBuilder::new().with_header(true).build(file);
	writer.write(&batch)?;
	Ok(())
}

// =============================================================================
// Internal helpers
// =============================================================================

fn utf8_schema(names: &[String]) -> Arc<Schema> {
	let fields: Vec<Field> = names
		.iter()
		.map(|name| Field::new(name, DataType::Utf8, true))
		.collect();
	Arc::new(Schema::new(fields))
}

fn read_first_line(path: &Path) -> Result<Option<String>, DatasetLoadError> {
	let file = File::open(path).map_err(|e| DatasetLoadError::io(path, e))?;
	BufReader::new(file)
		.lines()
		.next()
		.transpose()
		.map_err(|e| DatasetLoadError::io(path, e))
}

fn append_batch(
	batch: &RecordBatch,
	names: &[String],
	row_offset: usize,
	columns: &mut [Vec<String>],
) -> Result<(), DatasetLoadError> {
	for (c, (name, out)) in names.iter().zip(columns.iter_mut()).enumerate() {
		let col = batch.column(c);
		let arr = col
			.as_any()
			.downcast_ref::<StringArray>()
			.ok_or_else(|| DatasetLoadError::UnsupportedType {
				column: name.clone(),
				expected: "Utf8".into(),
				got: format!("{:?}", col.data_type()),
			})?;

		out.reserve(arr.len());
		for (r, value) in arr.iter().enumerate() {
			let value = value.ok_or_else(|| DatasetLoadError::MissingValue {
				column: name.clone(),
				row: row_offset + r,
			})?;
			out.push(value.to_owned());
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	const RAW_ROWS: &str = "\
p,x,s,n,t,p,f,c,n,k,e,e,s,s,w,w,p,w,o,p,k,s,u
e,x,s,y,t,a,f,c,b,k,e,c,s,s,w,w,p,w,o,p,n,n,g
e,b,s,w,t,l,f,c,b,n,e,c,s,s,w,w,p,w,o,p,n,n,m
";

	fn write_tmp(contents: &str) -> NamedTempFile {
		let mut f = NamedTempFile::new().unwrap();
		f.write_all(contents.as_bytes()).unwrap();
		f
	}

	#[test]
	fn headerless_file_gets_canonical_names() {
		let f = write_tmp(RAW_ROWS);
		let table = load_table(f.path()).unwrap();

		assert_eq!(table.n_rows(), 3);
		assert_eq!(table.n_columns(), 23);
		assert_eq!(table.column_names()[0], "class");
		assert_eq!(table.column_by_name("odor").unwrap(), &["p", "a", "l"]);
		assert_eq!(table.column_by_name("habitat").unwrap(), &["u", "g", "m"]);
	}

	#[test]
	fn header_row_is_used() {
		let f = write_tmp("class,odor\np,p\ne,a\n");
		let table = load_table(f.path()).unwrap();
		assert_eq!(table.column_names(), &["class", "odor"]);
		assert_eq!(table.n_rows(), 2);
		assert_eq!(table.value(1, 1), "a");
	}

	#[test]
	fn write_then_load_keeps_header_and_values() {
		let f = write_tmp(RAW_ROWS);
		let table = load_table(f.path()).unwrap();

		let dir = tempfile::tempdir().unwrap();
		let out = dir.path().join("data").join("mushrooms.csv");
		write_table(&table, &out).unwrap();

		let text = std::fs::read_to_string(&out).unwrap();
		assert!(text.starts_with("class,cap-shape,cap-surface"));
		assert_eq!(load_table(&out).unwrap(), table);
	}

	#[test]
	fn missing_file_is_io_error() {
		let err = load_table("/nonexistent/mushrooms.csv").unwrap_err();
		assert!(err.is_not_found());
	}

	#[test]
	fn empty_file_is_rejected() {
		let f = write_tmp("");
		assert!(matches!(load_table(f.path()), Err(DatasetLoadError::Empty(_))));
	}

	#[test]
	fn wrong_arity_is_arrow_error() {
		let f = write_tmp("p,x,s\n");
		assert!(matches!(load_table(f.path()), Err(DatasetLoadError::Arrow(_))));
	}
}
