//! In-memory table of named string columns.

/// A table of categorical observations with named columns.
///
/// Values are stored column-major: `columns[c][r]` is the value of column `c`
/// in row `r`. Every column has the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    names: Vec<String>,
    columns: Vec<Vec<String>>,
    n_rows: usize,
}

impl RawTable {
    /// Create a table from column names and column-major values.
    ///
    /// # Panics
    ///
    /// Panics if the number of names and columns differ or columns have
    /// different lengths.
    pub fn new(names: Vec<String>, columns: Vec<Vec<String>>) -> Self {
        assert_eq!(names.len(), columns.len(), "one name per column");
        let n_rows = columns.first().map_or(0, Vec::len);
        assert!(
            columns.iter().all(|c| c.len() == n_rows),
            "all columns must have the same length"
        );
        Self {
            names,
            columns,
            n_rows,
        }
    }

    /// Create a table from row-major records.
    ///
    /// # Panics
    ///
    /// Panics if a record's arity differs from the number of names.
    pub fn from_rows<R, S>(names: &[&str], rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        for row in rows {
            let mut arity = 0;
            for (c, value) in row.into_iter().enumerate() {
                columns[c].push(value.into());
                arity = c + 1;
            }
            assert_eq!(arity, names.len(), "record arity must match header");
        }
        Self::new(names.iter().map(|s| s.to_string()).collect(), columns)
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    /// Column names in file order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Values of column `idx`.
    pub fn column(&self, idx: usize) -> &[String] {
        &self.columns[idx]
    }

    /// Values of a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<&[String]> {
        self.column_index(name).map(|idx| self.column(idx))
    }

    /// Value at (`row`, `col`).
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> &str {
        &self.columns[col][row]
    }

    /// Iterate over one row's values in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(move |c| c[row].as_str())
    }

    /// A copy holding only the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let n = n.min(self.n_rows);
        let columns = self.columns.iter().map(|c| c[..n].to_vec()).collect();
        Self {
            names: self.names.clone(),
            columns,
            n_rows: n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        RawTable::from_rows(
            &["class", "odor"],
            [["p", "p"], ["e", "a"], ["e", "l"]],
        )
    }

    #[test]
    fn from_rows_is_column_major() {
        let table = sample();
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.n_columns(), 2);
        assert_eq!(table.column(0), &["p", "e", "e"]);
        assert_eq!(table.column_by_name("odor").unwrap(), &["p", "a", "l"]);
        assert_eq!(table.value(1, 1), "a");
    }

    #[test]
    fn row_iterates_in_column_order() {
        let table = sample();
        assert_eq!(table.row(2).collect::<Vec<_>>(), vec!["e", "l"]);
    }

    #[test]
    fn head_truncates_and_saturates() {
        let table = sample();
        assert_eq!(table.head(2).n_rows(), 2);
        assert_eq!(table.head(2).column(1), &["p", "a"]);
        assert_eq!(table.head(100).n_rows(), 3);
    }

    #[test]
    fn missing_column_is_none() {
        assert!(sample().column_by_name("habitat").is_none());
    }

    #[test]
    #[should_panic(expected = "arity")]
    fn from_rows_rejects_ragged_records() {
        RawTable::from_rows(&["a", "b"], [vec!["x", "y"], vec!["z"]]);
    }
}
