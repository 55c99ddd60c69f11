//! End-to-end tests for the recommender.
//!
//! These train the real random forest on the fixed table and check the
//! train/predict contract from the outside.

use catalog::{training_table, MovieFeatures, Outcome};
use recommender::{ForestConfig, Recommender, RecommenderError};

fn trained() -> Recommender {
    let mut recommender = Recommender::new(ForestConfig::default());
    recommender.train().expect("training on the fixed table succeeds");
    recommender
}

#[test]
fn test_untrained_rejects_every_input() {
    let recommender = Recommender::default();
    for genre in 0..=6u8 {
        for rating in 0..=5u8 {
            let result = recommender.predict(genre, 2, 2, 3, rating);
            assert!(matches!(result, Err(RecommenderError::Untrained)));
        }
    }
}

#[test]
fn test_report_accuracy_is_resubstitution() {
    let mut recommender = Recommender::new(ForestConfig::default());
    let report = recommender.train().unwrap();

    assert_eq!(report.total, 20);
    assert_eq!(report.table, training_table());

    // Recount by hand: the reported figure must be the share of training
    // rows whose prediction equals their own label
    let correct = report
        .table
        .iter()
        .filter(|row| {
            let prediction = recommender.predict_features(&row.features).unwrap();
            prediction.outcome == row.outcome
        })
        .count();

    assert_eq!(report.correct, correct);
    assert!((report.accuracy - correct as f64 / 20.0).abs() < 1e-12);
    assert!((0.0..=1.0).contains(&report.accuracy));
}

#[test]
fn test_probabilities_sum_to_one() {
    let recommender = trained();
    for row in training_table().feature_matrix() {
        let prediction = recommender
            .predict(row[0], row[1], row[2], row[3], row[4])
            .unwrap();
        let [p0, p1] = prediction.probabilities;
        assert!((0.0..=1.0).contains(&p0));
        assert!((0.0..=1.0).contains(&p1));
        assert!((p0 + p1 - 1.0).abs() < 1e-9);
        assert!(prediction.confidence() >= 0.5);
    }
}

#[test]
fn test_default_selection_is_reproducible() {
    // Action, PG-13, Medium, Modern, Good
    let first = trained().predict(1, 2, 2, 3, 3).unwrap();
    let second = trained().predict(1, 2, 2, 3, 3).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        trained()
            .predict_features(&MovieFeatures::default())
            .unwrap()
    );
}

#[test]
fn test_default_selection_is_watched() {
    // The selection is itself training row 1 and the four other genres'
    // identical rows are all labelled Will Watch
    let prediction = trained().predict(1, 2, 2, 3, 3).unwrap();
    assert_eq!(prediction.outcome, Outcome::WillWatch);
    // every one of the 100 seed-42 trees votes Will Watch
    assert_eq!(prediction.probabilities, [0.0, 1.0]);
    assert_eq!(prediction.confidence(), 1.0);
}

#[test]
fn test_predict_is_idempotent() {
    let recommender = trained();
    let first = recommender.predict(3, 4, 3, 2, 3).unwrap();
    for _ in 0..5 {
        assert_eq!(recommender.predict(3, 4, 3, 2, 3).unwrap(), first);
    }
}

#[test]
fn test_out_of_range_codes_pass_through() {
    let recommender = trained();
    let prediction = recommender.predict(9, 0, 12, 7, 99).unwrap();
    let [p0, p1] = prediction.probabilities;
    assert!((p0 + p1 - 1.0).abs() < 1e-9);
}

#[test]
fn test_retrain_stays_trained_and_deterministic() {
    let mut recommender = Recommender::new(ForestConfig::default());
    let first = recommender.train().unwrap();
    let before = recommender.predict(4, 4, 3, 2, 1).unwrap();

    let second = recommender.train().unwrap();
    assert!(recommender.is_trained());
    assert_eq!(first, second);
    assert_eq!(recommender.predict(4, 4, 3, 2, 1).unwrap(), before);
}

#[test]
fn test_different_seeds_train_independently() {
    let mut a = Recommender::new(ForestConfig::default().with_seed(1));
    let mut b = Recommender::new(ForestConfig::default().with_seed(2));
    a.train().unwrap();
    b.train().unwrap();

    assert_eq!(a.model_info().seed, 1);
    assert_eq!(b.model_info().seed, 2);
}
