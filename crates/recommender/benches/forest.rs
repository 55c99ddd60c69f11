//! Benchmarks for training and prediction
//!
//! Run with: cargo bench --package recommender

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recommender::{ForestConfig, Recommender};

fn bench_train(c: &mut Criterion) {
    c.bench_function("train_100_trees", |b| {
        b.iter(|| {
            let mut recommender = Recommender::new(ForestConfig::default());
            let report = recommender.train().expect("Failed to train");
            black_box(report)
        })
    });
}

fn bench_predict(c: &mut Criterion) {
    let mut recommender = Recommender::new(ForestConfig::default());
    recommender.train().expect("Failed to train");

    c.bench_function("predict_single", |b| {
        b.iter(|| {
            let prediction = recommender
                .predict(black_box(1), black_box(2), black_box(2), black_box(3), black_box(3))
                .unwrap();
            black_box(prediction)
        })
    });
}

criterion_group!(benches, bench_train, bench_predict);
criterion_main!(benches);
