//! # Recommender Crate
//!
//! Trains a classifier on the fixed movie table and answers
//! "will this user watch it?" for any five-code selection.
//!
//! ## Architecture
//! - **classifier**: the `Classifier` trait, the seam between the
//!   recommender and whatever model backs it
//! - **forest**: `RandomForest`, a seeded bagging ensemble of linfa
//!   decision trees implementing `Classifier`
//! - **recommender**: the Untrained/Trained state machine, predictions and
//!   training reports
//! - **config**: forest hyperparameters, optionally read from TOML
//!
//! ## Example Usage
//! ```
//! use recommender::{ForestConfig, Recommender};
//!
//! let mut recommender = Recommender::new(ForestConfig::default());
//! let report = recommender.train()?;
//! println!("accuracy on training data: {:.1}%", report.accuracy * 100.0);
//!
//! // Action, PG-13, Medium, Modern, Good
//! let prediction = recommender.predict(1, 2, 2, 3, 3)?;
//! println!("{} ({:.1}%)", prediction.outcome, prediction.confidence() * 100.0);
//! # Ok::<(), recommender::RecommenderError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod forest;
pub mod recommender;

// Re-export main types
pub use classifier::Classifier;
pub use config::ForestConfig;
pub use error::{ClassifierError, ConfigError, RecommenderError, Result};
pub use forest::RandomForest;
pub use recommender::{ModelInfo, Prediction, Recommender, TrainingReport};
