//! Which features the trained ensemble relies on.
//!
//! [`ImportanceType`] picks the per-split statistic that is summed per feature:
//! split counts, split gain or node cover (hessian sum), the latter two also
//! available averaged over the feature's split count. The metrics artifact
//! stores normalized gain.
//!
//! ```ignore
//! let importance = model.feature_importance(ImportanceType::Gain)?;
//! let strongest = importance.top_k(10);
//! ```

mod importance;

pub use importance::{compute_forest_importance, ExplainError, FeatureImportance, ImportanceType};
