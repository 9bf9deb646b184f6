//! HTML building blocks shared by the views.

use std::fmt::Write;

/// Escape text for use in element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Top-level navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Predict,
    Metrics,
    Dataset,
}

const NAV_ITEMS: [(Nav, &str, &str); 3] = [
    (Nav::Predict, "/", "Inference"),
    (Nav::Metrics, "/metrics", "Metrics"),
    (Nav::Dataset, "/dataset", "Dataset"),
];

/// Wrap a view body in the shared document layout.
pub fn page(title: &str, active: Nav, body: &str) -> String {
    let mut nav = String::new();
    for (item, href, label) in NAV_ITEMS {
        let class = if item == active { " class=\"active\"" } else { "" };
        let _ = write!(nav, "<a href=\"{href}\"{class}>{label}</a>");
    }

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title} | Mushroom Classification</title></head>\n\
         <body>\n\
         <header><h1>Fungi Classification Module</h1><p>Gradient Boosting Edibility Detector</p><nav>{nav}</nav></header>\n\
         <main>\n{body}\n</main>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
    )
}

/// Body shown in place of model views when no artifact set is loaded.
pub fn guidance() -> String {
    "<section class=\"warning\">\
     <h2>No trained model found</h2>\
     <p>Mushroom models not identified. Run <code>mycoboost-train</code> first, then restart the dashboard.</p>\
     </section>"
        .to_owned()
}

/// An inline error box.
pub fn error_box(message: &str) -> String {
    format!("<div class=\"error\" role=\"alert\">{}</div>", escape(message))
}

/// Human-readable form of a feature name: `cap-shape` → `Cap Shape`.
pub fn display_name(feature: &str) -> String {
    feature
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape("odor"), "odor");
    }

    #[test]
    fn page_marks_active_nav() {
        let html = page("Metrics", Nav::Metrics, "<p>body</p>");
        assert!(html.contains("<a href=\"/metrics\" class=\"active\">Metrics</a>"));
        assert!(html.contains("<a href=\"/\">Inference</a>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("stalk-surface-above-ring"), "Stalk Surface Above Ring");
        assert_eq!(display_name("odor"), "Odor");
    }
}
