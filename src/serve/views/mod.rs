//! Pure render functions, one per dashboard view.
//!
//! Each takes the loaded artifacts and the request's values and returns an
//! HTML fragment; nothing is carried between calls.

pub mod dataset;
pub mod inference;
pub mod report;

pub use dataset::{preview, render_dataset};
pub use inference::{
    classify, order_features, parse_form, render_inference, submitted_inputs, FormValues, InferenceError, Prediction,
    Verdict,
};
pub use report::render_report;
