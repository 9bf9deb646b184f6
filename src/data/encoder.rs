//! Categorical encoding of string columns into dense integer codes.
//!
//! Each column gets its own [`ColumnEncoder`] whose vocabulary is the sorted
//! set of distinct values seen during fitting. Index assignment is therefore
//! lexicographic and deterministic: fitting twice over the same column yields
//! the same mapping.
//!
//! Values not seen during fitting are rejected with
//! [`EncodeError::UnknownCategory`]; there is no "unknown" bucket.

use std::collections::BTreeSet;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::RawTable;

/// Errors raised while encoding values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("column '{column}' has no category '{value}'")]
    UnknownCategory { column: String, value: String },

    #[error("table has no column '{0}'")]
    MissingColumn(String),

    #[error("encoder was fit on {expected} columns, table has {got}")]
    ColumnCountMismatch { expected: usize, got: usize },
}

// =============================================================================
// ColumnEncoder
// =============================================================================

/// Bidirectional mapping between a column's categories and `[0, n_classes)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEncoder {
    name: String,
    classes: Vec<String>,
}

impl ColumnEncoder {
    /// Fit an encoder over the observed values of one column.
    pub fn fit<'a, I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: BTreeSet<&str> = values.into_iter().collect();
        Self {
            name: name.into(),
            classes: classes.into_iter().map(str::to_owned).collect(),
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sorted vocabulary; position = code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct categories.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Code for `value`.
    pub fn encode(&self, value: &str) -> Result<u32, EncodeError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .map(|idx| idx as u32)
            .map_err(|_| EncodeError::UnknownCategory {
                column: self.name.clone(),
                value: value.to_owned(),
            })
    }

    /// Category for `code`, if in range.
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }
}

// =============================================================================
// TableEncoder
// =============================================================================

/// One [`ColumnEncoder`] per column of a table, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEncoder {
    columns: Vec<ColumnEncoder>,
}

impl TableEncoder {
    /// Fit an encoder for every column (label included).
    pub fn fit(table: &RawTable) -> Self {
        let columns = table
            .column_names()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                ColumnEncoder::fit(name.clone(), table.column(idx).iter().map(String::as_str))
            })
            .collect();
        Self { columns }
    }

    /// Encoders in column order.
    pub fn columns(&self) -> &[ColumnEncoder] {
        &self.columns
    }

    /// Encoder for a named column.
    pub fn column(&self, name: &str) -> Option<&ColumnEncoder> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Encode every cell of `table`.
    ///
    /// The table must have the columns this encoder was fit on, in any order.
    pub fn transform(&self, table: &RawTable) -> Result<EncodedTable, EncodeError> {
        if table.n_columns() != self.columns.len() {
            return Err(EncodeError::ColumnCountMismatch {
                expected: self.columns.len(),
                got: table.n_columns(),
            });
        }

        let n_rows = table.n_rows();
        let mut codes = Array2::<u32>::zeros((n_rows, self.columns.len()));
        for (c, encoder) in self.columns.iter().enumerate() {
            let values = table
                .column_by_name(&encoder.name)
                .ok_or_else(|| EncodeError::MissingColumn(encoder.name.clone()))?;
            for (r, value) in values.iter().enumerate() {
                codes[[r, c]] = encoder.encode(value)?;
            }
        }

        Ok(EncodedTable {
            names: self.columns.iter().map(|c| c.name.clone()).collect(),
            codes,
        })
    }

    /// Fit and transform in one step.
    pub fn fit_transform(table: &RawTable) -> Result<(Self, EncodedTable), EncodeError> {
        let encoder = Self::fit(table);
        let encoded = encoder.transform(table)?;
        Ok((encoder, encoded))
    }
}

// =============================================================================
// EncodedTable
// =============================================================================

/// A table whose cells are category codes, shape `[n_rows, n_columns]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTable {
    names: Vec<String>,
    codes: Array2<u32>,
}

impl EncodedTable {
    /// Column names in column order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Codes with shape `[n_rows, n_columns]`.
    pub fn codes(&self) -> &Array2<u32> {
        &self.codes
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.codes.nrows()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
