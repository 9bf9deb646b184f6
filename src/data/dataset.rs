//! Feature matrix + label vector built from an encoded table.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use super::{EncodedTable, TableEncoder, TrainTestSplit};

/// Errors building a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    #[error("target column '{0}' not found")]
    MissingTarget(String),

    #[error("target column '{column}' has {n_classes} classes, binary classification needs 2")]
    NotBinary { column: String, n_classes: usize },

    #[error("encoder does not cover column '{0}'")]
    MissingEncoder(String),

    #[error("row index {row} out of bounds for {n_rows} rows")]
    RowOutOfBounds { row: usize, n_rows: usize },
}

/// Encoded features and binary labels.
///
/// Features are sample-major with shape `[n_samples, n_features]`; each value
/// is a category code stored as `f32`. Labels are the target codes (0 or 1).
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f32>,
    labels: Array1<f32>,
    feature_names: Vec<String>,
    n_categories: Vec<u32>,
}

impl Dataset {
    /// Build a dataset by dropping `target` from the encoded table.
    ///
    /// Feature order is the table's column order with the target removed.
    pub fn from_encoded(
        encoded: &EncodedTable,
        encoder: &TableEncoder,
        target: &str,
    ) -> Result<Self, DatasetError> {
        let target_idx = encoded
            .column_index(target)
            .ok_or_else(|| DatasetError::MissingTarget(target.to_owned()))?;

        let n_classes = encoder
            .column(target)
            .ok_or_else(|| DatasetError::MissingEncoder(target.to_owned()))?
            .n_classes();
        if n_classes != 2 {
            return Err(DatasetError::NotBinary {
                column: target.to_owned(),
                n_classes,
            });
        }

        let feature_cols: Vec<usize> = (0..encoded.column_names().len())
            .filter(|&c| c != target_idx)
            .collect();

        let mut feature_names = Vec::with_capacity(feature_cols.len());
        let mut n_categories = Vec::with_capacity(feature_cols.len());
        for &c in &feature_cols {
            let name = &encoded.column_names()[c];
            let column = encoder
                .column(name)
                .ok_or_else(|| DatasetError::MissingEncoder(name.clone()))?;
            feature_names.push(name.clone());
            n_categories.push(column.n_classes() as u32);
        }

        let codes = encoded.codes();
        let features = codes
            .select(Axis(1), &feature_cols)
            .mapv(|code| code as f32);
        let labels = codes.column(target_idx).mapv(|code| code as f32);

        Ok(Self {
            features,
            labels,
            feature_names,
            n_categories,
        })
    }

    /// Build a dataset from raw parts.
    ///
    /// # Panics
    ///
    /// Panics if the shapes disagree.
    pub fn from_parts(
        features: Array2<f32>,
        labels: Array1<f32>,
        feature_names: Vec<String>,
        n_categories: Vec<u32>,
    ) -> Self {
        assert_eq!(features.nrows(), labels.len(), "one label per sample");
        assert_eq!(features.ncols(), feature_names.len(), "one name per feature");
        assert_eq!(features.ncols(), n_categories.len(), "one vocabulary size per feature");
        Self {
            features,
            labels,
            feature_names,
            n_categories,
        }
    }

    /// Number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Feature matrix `[n_samples, n_features]`.
    pub fn features(&self) -> ArrayView2<'_, f32> {
        self.features.view()
    }

    /// Labels `[n_samples]`.
    pub fn labels(&self) -> ArrayView1<'_, f32> {
        self.labels.view()
    }

    /// Ordered feature names.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Vocabulary size of each feature.
    pub fn n_categories(&self) -> &[u32] {
        &self.n_categories
    }

    /// A new dataset holding only `rows`, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Result<Self, DatasetError> {
        let n_rows = self.n_samples();
        if let Some(&row) = rows.iter().find(|&&r| r >= n_rows) {
            return Err(DatasetError::RowOutOfBounds { row, n_rows });
        }
        Ok(Self {
            features: self.features.select(Axis(0), rows),
            labels: self.labels.select(Axis(0), rows),
            feature_names: self.feature_names.clone(),
            n_categories: self.n_categories.clone(),
        })
    }

    /// Split into `(train, test)` datasets.
    pub fn split(&self, split: &TrainTestSplit) -> Result<(Self, Self), DatasetError> {
        Ok((self.select_rows(&split.train)?, self.select_rows(&split.test)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{train_test_split, RawTable};

    fn encoded() -> (TableEncoder, EncodedTable) {
        let table = RawTable::from_rows(
            &["cap-shape", "class", "odor"],
            [
                ["x", "p", "p"],
                ["b", "e", "a"],
                ["x", "e", "l"],
                ["f", "p", "f"],
            ],
        );
        TableEncoder::fit_transform(&table).unwrap()
    }

    #[test]
    fn target_is_removed_from_features() {
        let (encoder, encoded) = encoded();
        let ds = Dataset::from_encoded(&encoded, &encoder, "class").unwrap();

        assert_eq!(ds.n_samples(), 4);
        assert_eq!(ds.feature_names(), &["cap-shape", "odor"]);
        assert_eq!(ds.n_categories(), &[3, 4]);
        assert_eq!(ds.labels().to_vec(), vec![1.0, 0.0, 0.0, 1.0]);
        // cap-shape: b=0 f=1 x=2; odor: a=0 f=1 l=2 p=3
        assert_eq!(ds.features().row(0).to_vec(), vec![2.0, 3.0]);
        assert_eq!(ds.features().row(3).to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn missing_target() {
        let (encoder, encoded) = encoded();
        assert_eq!(
            Dataset::from_encoded(&encoded, &encoder, "edibility"),
            Err(DatasetError::MissingTarget("edibility".into()))
        );
    }

    #[test]
    fn non_binary_target_is_rejected() {
        let (encoder, encoded) = encoded();
        assert!(matches!(
            Dataset::from_encoded(&encoded, &encoder, "odor"),
            Err(DatasetError::NotBinary { n_classes: 4, .. })
        ));
    }

    #[test]
    fn split_preserves_rows() {
        let (encoder, encoded) = encoded();
        let ds = Dataset::from_encoded(&encoded, &encoder, "class").unwrap();
        let split = train_test_split(ds.n_samples(), 0.5, 42).unwrap();
        let (train, test) = ds.split(&split).unwrap();

        assert_eq!(train.n_samples() + test.n_samples(), 4);
        for (i, &row) in split.test.iter().enumerate() {
            assert_eq!(test.features().row(i), ds.features().row(row));
            assert_eq!(test.labels()[i], ds.labels()[row]);
        }
    }

    #[test]
    fn select_rows_out_of_bounds() {
        let (encoder, encoded) = encoded();
        let ds = Dataset::from_encoded(&encoded, &encoder, "class").unwrap();
        assert_eq!(
            ds.select_rows(&[0, 9]),
            Err(DatasetError::RowOutOfBounds { row: 9, n_rows: 4 })
        );
    }
}
