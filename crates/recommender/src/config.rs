//! Forest configuration, optionally loaded from a TOML file.
//!
//! ```toml
//! [model]
//! n_estimators = 100
//! seed = 42
//! max_depth = 6
//! feature_subsample = 0.8
//! bootstrap = true
//! ```
//!
//! Every key is optional; missing keys keep their default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Hyperparameters of the random forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_estimators: usize,
    /// Base seed; tree `i` is grown from `seed + i`
    pub seed: u64,
    /// Maximum tree depth (`None` grows until leaves are pure)
    pub max_depth: Option<usize>,
    /// Fraction of the feature columns each tree sees, in (0, 1]
    pub feature_subsample: f64,
    /// Draw each tree's rows with replacement
    pub bootstrap: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            seed: 42,
            max_depth: None,
            feature_subsample: 1.0,
            bootstrap: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    model: ForestConfig,
}

impl ForestConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(toml_str)?;
        file.model.validate()?;
        Ok(file.model)
    }

    /// Builder-style override of the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder-style override of the ensemble size
    pub fn with_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_estimators == 0 {
            return Err(ConfigError::Invalid(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if !(self.feature_subsample > 0.0 && self.feature_subsample <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "feature_subsample must be in (0, 1], got {}",
                self.feature_subsample
            )));
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::Invalid("max_depth must be at least 1".to_string()));
        }
        Ok(())
    }

    /// How many of `total` feature columns a single tree is grown on
    pub fn features_per_tree(&self, total: usize) -> usize {
        let wanted = (self.feature_subsample * total as f64).ceil() as usize;
        wanted.clamp(1, total)
    }
}
