//! The classifier oracle seam.
//!
//! The recommender does not care how a model is grown, only that it can be
//! fit on labelled rows and then queried for a label and a probability pair.

use catalog::{FeatureRow, Outcome};

use crate::error::ClassifierError;

/// Core trait for binary classifiers over encoded movie rows.
///
/// ## Design Note
/// - `Send + Sync` lets a fitted model be shared by concurrent requests
/// - `predict` and `predict_proba` take `&self`: querying never mutates
pub trait Classifier: Send + Sync {
    /// Returns the name of this algorithm (for logging/display)
    fn name(&self) -> &str;

    /// Fit on `rows` with aligned `labels`, discarding any previous fit.
    fn fit(&mut self, rows: &[FeatureRow], labels: &[Outcome]) -> Result<(), ClassifierError>;

    /// Predicted label for one row.
    fn predict(&self, row: FeatureRow) -> Result<Outcome, ClassifierError>;

    /// Probability of each label for one row, indexed by
    /// [`Outcome::index`]: `[p(Won't Watch), p(Will Watch)]`.
    fn predict_proba(&self, row: FeatureRow) -> Result<[f64; 2], ClassifierError>;
}
