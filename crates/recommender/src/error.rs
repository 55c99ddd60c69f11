//! Error types for the recommender crate.
//!
//! Two layers, mirroring the two components:
//! - `ClassifierError` for the oracle (fitting and querying the forest)
//! - `RecommenderError` for the state machine wrapped around it

use thiserror::Error;

/// Errors raised by a [`Classifier`](crate::Classifier) implementation
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Fit was called with no examples
    #[error("Cannot fit on an empty training set")]
    EmptyTrainingSet,

    /// Feature rows and labels differ in length
    #[error("Got {rows} feature rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    /// Predict was called before fit
    #[error("Classifier has not been fitted")]
    NotFitted,

    /// A tree voted for a class outside the binary label set
    #[error("Tree predicted unexpected class {0}")]
    UnexpectedClass(usize),

    /// The forest configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying tree learner failed
    #[error("Decision tree error: {0}")]
    Tree(String),
}

/// Errors raised while loading or validating a [`ForestConfig`](crate::ForestConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors raised by [`Recommender`](crate::Recommender)
#[derive(Error, Debug)]
pub enum RecommenderError {
    /// `predict` was called while the recommender is still Untrained
    #[error("Model must be trained first")]
    Untrained,

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommenderError>;
