//! Seeded random forest over encoded movie rows.
//!
//! ## Algorithm
//! For each of `n_estimators` trees, independently:
//! 1. Seed an RNG with `seed + tree_index`
//! 2. Draw `n` rows with replacement (bootstrap), or take all rows
//! 3. Pick a random subset of feature columns
//! 4. Grow a CART tree (Gini impurity) on that sample
//!
//! Prediction is a majority vote; the vote shares are the probabilities.
//!
//! ## Performance Note
//! Trees are grown in parallel with Rayon. Every tree owns its RNG, so the
//! fitted forest does not depend on how Rayon schedules the work.

use catalog::{FEATURE_COUNT, FeatureRow, Outcome};
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::fmt;
use tracing::debug;

use crate::classifier::Classifier;
use crate::config::ForestConfig;
use crate::error::ClassifierError;

/// One member of the ensemble.
enum FittedTree {
    /// The tree's sample held a single class, so it always votes for it
    Constant(usize),
    /// A grown tree and the feature columns it was grown on
    Grown {
        features: Vec<usize>,
        tree: DecisionTree<f64, usize>,
    },
}

impl FittedTree {
    fn vote(&self, row: &FeatureRow) -> usize {
        match self {
            FittedTree::Constant(class) => *class,
            FittedTree::Grown { features, tree } => {
                use linfa::traits::Predict;

                let x = Array2::from_shape_fn((1, features.len()), |(_, j)| {
                    f64::from(row[features[j]])
                });
                let predicted: Array1<usize> = tree.predict(&x);
                predicted[0]
            }
        }
    }
}

/// Bagging ensemble of decision trees.
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<FittedTree>,
}

impl fmt::Debug for RandomForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForest")
            .field("config", &self.config)
            .field("trees", &self.trees.len())
            .finish()
    }
}

impl RandomForest {
    /// Create an unfitted forest.
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Number of fitted trees (0 before `fit`)
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl Classifier for RandomForest {
    fn name(&self) -> &str {
        "Random Forest"
    }

    fn fit(&mut self, rows: &[FeatureRow], labels: &[Outcome]) -> Result<(), ClassifierError> {
        self.config.validate()?;
        if rows.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }
        if rows.len() != labels.len() {
            return Err(ClassifierError::LengthMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }

        let records = Array2::from_shape_fn((rows.len(), FEATURE_COUNT), |(i, j)| {
            f64::from(rows[i][j])
        });
        let targets: Array1<usize> = labels.iter().map(|label| label.index()).collect();

        let config = &self.config;
        let trees = (0..config.n_estimators)
            .into_par_iter()
            .map(|index| grow_tree(config, index, &records, &targets))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Fitted {} trees on {} rows",
            trees.len(),
            records.nrows()
        );
        self.trees = trees;
        Ok(())
    }

    fn predict(&self, row: FeatureRow) -> Result<Outcome, ClassifierError> {
        let [wont_watch, will_watch] = self.predict_proba(row)?;
        // Ties go to the lower class index, as with an argmax
        Ok(Outcome::from(will_watch > wont_watch))
    }

    fn predict_proba(&self, row: FeatureRow) -> Result<[f64; 2], ClassifierError> {
        if self.trees.is_empty() {
            return Err(ClassifierError::NotFitted);
        }

        let mut votes = [0usize; 2];
        for tree in &self.trees {
            let class = tree.vote(&row);
            let slot = votes
                .get_mut(class)
                .ok_or(ClassifierError::UnexpectedClass(class))?;
            *slot += 1;
        }

        let total = self.trees.len() as f64;
        Ok([votes[0] as f64 / total, votes[1] as f64 / total])
    }
}

/// Grow the `index`-th tree of the forest.
fn grow_tree(
    config: &ForestConfig,
    index: usize,
    records: &Array2<f64>,
    targets: &Array1<usize>,
) -> Result<FittedTree, ClassifierError> {
    use linfa::traits::Fit;

    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(index as u64));
    let n = records.nrows();

    let sample: Vec<usize> = if config.bootstrap {
        (0..n).map(|_| rng.random_range(0..n)).collect()
    } else {
        (0..n).collect()
    };

    let total_features = records.ncols();
    let mut features =
        rand::seq::index::sample(&mut rng, total_features, config.features_per_tree(total_features))
            .into_vec();
    features.sort_unstable();

    let sample_targets = targets.select(Axis(0), &sample);
    let first = sample_targets[0];
    if sample_targets.iter().all(|&class| class == first) {
        return Ok(FittedTree::Constant(first));
    }

    let sample_records = records.select(Axis(0), &sample).select(Axis(1), &features);
    let dataset = Dataset::new(sample_records, sample_targets);

    let tree = DecisionTree::<f64, usize>::params()
        .split_quality(SplitQuality::Gini)
        .max_depth(config.max_depth)
        .fit(&dataset)
        .map_err(|err| ClassifierError::Tree(err.to_string()))?;

    Ok(FittedTree::Grown { features, tree })
}
