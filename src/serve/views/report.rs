//! Reporting view: accuracy, model type, classification report and the
//! feature importance chart.

use std::fmt::Write;

use crate::artifacts::ArtifactSet;
use crate::serve::chart::horizontal_bar_chart;
use crate::serve::html::{error_box, escape};
use crate::training::ClassificationReport;

/// Render the metrics of `set` with the `top_n` most important features.
pub fn render_report(set: &ArtifactSet, top_n: usize) -> String {
    let metrics = &set.metrics;
    let mut html = format!(
        "<section class=\"metrics\"><h2>Model Performance</h2>\
         <dl><dt>Accuracy</dt><dd class=\"accuracy\">{accuracy:.2}%</dd>\
         <dt>Ensemble Engine</dt><dd class=\"model-type\">{model_type}</dd></dl>",
        accuracy = metrics.accuracy * 100.0,
        model_type = escape(&metrics.model_type),
    );

    if let Some(report) = &metrics.classification_report {
        html.push_str(&render_classification_report(report));
    }

    let top = set.top_features(top_n);
    if top.is_empty() {
        html.push_str("<p>No feature importance recorded.</p>");
    } else {
        let title = format!("Top {} Biological Feature Importance", top.len());
        match horizontal_bar_chart(&title, &top) {
            Ok(svg) => html.push_str(&svg),
            Err(err) => {
                tracing::warn!(error = %err, "feature importance chart failed");
                html.push_str(&error_box(&err.to_string()));
            }
        }
    }
    html.push_str("</section>");
    html
}

fn render_classification_report(report: &ClassificationReport) -> String {
    let mut html = String::from(
        "<table class=\"classification-report\"><thead><tr>\
         <th></th><th>precision</th><th>recall</th><th>f1-score</th><th>support</th>\
         </tr></thead><tbody>",
    );
    let rows = report
        .classes
        .iter()
        .map(|(name, scores)| (name.as_str(), scores))
        .chain([("macro avg", &report.macro_avg), ("weighted avg", &report.weighted_avg)]);
    for (name, s) in rows {
        let _ = write!(
            html,
            "<tr><th>{}</th><td>{:.4}</td><td>{:.4}</td><td>{:.4}</td><td>{}</td></tr>",
            escape(name),
            s.precision,
            s.recall,
            s.f1_score,
            s.support
        );
    }
    html.push_str("</tbody></table>");
    html
}
