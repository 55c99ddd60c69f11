//! # Recommender
//!
//! Wraps a classifier in a two-state machine:
//!
//! ```text
//!   Untrained --train()--> Trained
//!                           |  ^
//!                           +--+ train() again re-fits from scratch
//! ```
//!
//! There is no way back to Untrained; construct a new instance instead.
//!
//! The reported accuracy is re-substitution accuracy: the freshly fitted
//! model is asked to reclassify the same 20 rows it was trained on.

use catalog::{training_table, Axis, Category, FeatureRow, MovieFeatures, Outcome, TrainingTable, FEATURE_COUNT};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::config::ForestConfig;
use crate::error::{RecommenderError, Result};
use crate::forest::RandomForest;

/// Result of a single prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub outcome: Outcome,
    /// `[p(Won't Watch), p(Will Watch)]`
    pub probabilities: [f64; 2],
}

impl Prediction {
    /// Probability of the predicted label
    pub fn confidence(&self) -> f64 {
        self.probabilities[self.outcome.index()]
    }

    pub fn will_watch(&self) -> bool {
        self.outcome.is_will_watch()
    }
}

/// What `train()` hands back: the table and how well the model fits it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub table: TrainingTable,
    /// Rows the fitted model reclassifies correctly
    pub correct: usize,
    pub total: usize,
    /// `correct / total`, in [0, 1]
    pub accuracy: f64,
}

/// Static description of the model, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub algorithm: String,
    pub n_estimators: usize,
    pub seed: u64,
    pub training_samples: usize,
    pub features: [&'static str; FEATURE_COUNT],
    pub classes: [&'static str; 2],
}

#[derive(Debug)]
enum ModelState {
    Untrained,
    Trained(TrainingReport),
}

/// Owns a classifier and tracks whether it has been trained.
///
/// Rust concept: the classifier type is a generic parameter with a default,
/// so `Recommender` alone means `Recommender<RandomForest>` while tests can
/// plug in any other `Classifier`.
#[derive(Debug)]
pub struct Recommender<C = RandomForest> {
    classifier: C,
    state: ModelState,
}

impl Recommender<RandomForest> {
    /// Create an Untrained recommender backed by a random forest.
    pub fn new(config: ForestConfig) -> Self {
        Self::with_classifier(RandomForest::new(config))
    }

    /// Describe the backing forest.
    pub fn model_info(&self) -> ModelInfo {
        let config = self.classifier.config();
        ModelInfo {
            algorithm: self.classifier.name().to_string(),
            n_estimators: config.n_estimators,
            seed: config.seed,
            training_samples: self.training_report().map_or(0, |report| report.total),
            features: Axis::FEATURES.map(Axis::title),
            classes: [Outcome::WontWatch.label(), Outcome::WillWatch.label()],
        }
    }
}

impl Default for Recommender<RandomForest> {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl<C: Classifier> Recommender<C> {
    /// Create an Untrained recommender around any classifier.
    pub fn with_classifier(classifier: C) -> Self {
        Self {
            classifier,
            state: ModelState::Untrained,
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self.state, ModelState::Trained(_))
    }

    /// Report of the last successful `train()`, if any
    pub fn training_report(&self) -> Option<&TrainingReport> {
        match &self.state {
            ModelState::Trained(report) => Some(report),
            ModelState::Untrained => None,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Fit the classifier on the fixed training table.
    ///
    /// # Returns
    /// The training table plus re-substitution accuracy
    pub fn train(&mut self) -> Result<TrainingReport> {
        let start = Instant::now();
        let table = training_table();
        let rows = table.feature_matrix();
        let labels = table.labels();

        // A failed re-fit must not leave a half-fitted model looking Trained
        self.state = ModelState::Untrained;
        self.classifier.fit(&rows, &labels)?;

        let mut correct = 0;
        for (row, label) in rows.iter().zip(&labels) {
            if self.classifier.predict(*row)? == *label {
                correct += 1;
            }
        }

        let total = rows.len();
        let report = TrainingReport {
            table,
            correct,
            total,
            accuracy: correct as f64 / total as f64,
        };

        info!(
            "Trained {} on {} rows in {:?}: accuracy {:.1}% ({}/{})",
            self.classifier.name(),
            total,
            start.elapsed(),
            report.accuracy * 100.0,
            correct,
            total
        );

        self.state = ModelState::Trained(report.clone());
        Ok(report)
    }

    /// Predict from five raw category codes.
    ///
    /// The codes are handed to the classifier as-is; they are not checked
    /// against their axes.
    ///
    /// # Returns
    /// * `Ok(Prediction)` - label and `[p0, p1]`
    /// * `Err(RecommenderError::Untrained)` - if `train()` has not succeeded
    pub fn predict(
        &self,
        genre: u8,
        age_rating: u8,
        length: u8,
        era: u8,
        user_rating: u8,
    ) -> Result<Prediction> {
        self.predict_row([genre, age_rating, length, era, user_rating])
    }

    /// Predict for a typed selection.
    pub fn predict_features(&self, features: &MovieFeatures) -> Result<Prediction> {
        self.predict_row(features.codes())
    }

    fn predict_row(&self, row: FeatureRow) -> Result<Prediction> {
        if !self.is_trained() {
            return Err(RecommenderError::Untrained);
        }

        let outcome = self.classifier.predict(row)?;
        let probabilities = self.classifier.predict_proba(row)?;
        debug!(
            "Predicted {:?} for {:?} (p = [{:.3}, {:.3}])",
            outcome, row, probabilities[0], probabilities[1]
        );

        Ok(Prediction {
            outcome,
            probabilities,
        })
    }
}
