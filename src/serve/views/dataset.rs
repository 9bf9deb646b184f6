//! Dataset viewer: a bounded prefix of the dataset file.

use std::fmt::Write;
use std::path::Path;

use crate::data::io::{load_table, DatasetLoadError};
use crate::data::RawTable;
use crate::serve::html::{error_box, escape};

/// Read the first `n_rows` rows of the dataset at `path`.
pub fn preview(path: &Path, n_rows: usize) -> Result<RawTable, DatasetLoadError> {
    Ok(load_table(path)?.head(n_rows))
}

/// Render a preview, or the load error inline.
pub fn render_dataset(path: &Path, outcome: &Result<RawTable, DatasetLoadError>) -> String {
    let mut html = String::from("<section class=\"dataset\"><h2>Dataset Preview</h2>");
    match outcome {
        Ok(table) => {
            let _ = write!(
                html,
                "<p>First {} rows of <code>{}</code>.</p><table class=\"dataset-preview\"><thead><tr>",
                table.n_rows(),
                escape(&path.display().to_string())
            );
            for name in table.column_names() {
                let _ = write!(html, "<th>{}</th>", escape(name));
            }
            html.push_str("</tr></thead><tbody>");
            for row in 0..table.n_rows() {
                html.push_str("<tr>");
                for value in table.row(row) {
                    let _ = write!(html, "<td>{}</td>", escape(value));
                }
                html.push_str("</tr>");
            }
            html.push_str("</tbody></table>");
        }
        Err(err) if err.is_not_found() => {
            html.push_str(&error_box(&format!(
                "Dataset file {} not found. Run mycoboost-train to create it.",
                path.display()
            )));
        }
        Err(err) => html.push_str(&error_box(&format!("Could not read dataset: {err}"))),
    }
    html.push_str("</section>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::io::write_table;

    #[test]
    fn preview_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mushrooms.csv");
        let rows = (0..150).map(|i| if i % 2 == 0 { ["e", "a"] } else { ["p", "f"] });
        write_table(&RawTable::from_rows(&["class", "odor"], rows), &path).unwrap();

        let outcome = preview(&path, 100);
        let table = outcome.as_ref().unwrap();
        assert_eq!(table.n_rows(), 100);

        let html = render_dataset(&path, &outcome);
        assert_eq!(html.matches("<tr><td>").count(), 100);
        assert!(html.contains("<th>odor</th>"));
    }

    #[test]
    fn missing_file_is_reported_inline() {
        let path = Path::new("/nonexistent/mushrooms.csv");
        let outcome = preview(path, 100);
        let html = render_dataset(path, &outcome);
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("not found"));
    }
}
