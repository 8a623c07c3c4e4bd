//! # FuzzyART Benchmarks
//!
//! Learn/predict cost is O(C × M); these benches sweep category count and
//! input dimension, plus the snapshot round-trip.
//!
//! Run: `cargo bench --bench fuzzy_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use art_fuzzy::{load_categories, save_categories, FuzzyArt, FuzzyParams};

fn trained(categories: usize, dim: usize) -> FuzzyArt {
    let mut art = FuzzyArt::new(FuzzyParams {
        rho: 0.95,
        max_categories: categories + 8,
        ..Default::default()
    })
    .unwrap();
    for k in 0..categories {
        let input: Vec<f64> = (0..dim)
            .map(|i| ((i * 31 + k * 17) % 100) as f64 / 100.0)
            .collect();
        art.learn(&input).unwrap();
    }
    art
}

/// Benchmark learn across category counts
fn bench_learn(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_learn");

    for categories in [10usize, 100, 500] {
        group.bench_with_input(
            BenchmarkId::from_parameter(categories),
            &categories,
            |b, &categories| {
                let mut art = trained(categories, 32);
                let probe: Vec<f64> = (0..32).map(|i| (i % 10) as f64 / 10.0).collect();
                b.iter(|| {
                    black_box(art.learn(black_box(&probe)).unwrap());
                })
            },
        );
    }

    group.finish();
}

/// Benchmark read-only prediction
fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_predict");

    for dim in [16usize, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            let mut art = trained(100, dim);
            let probe: Vec<f64> = (0..dim).map(|i| (i % 7) as f64 / 7.0).collect();
            b.iter(|| {
                black_box(art.predict(black_box(&probe)).unwrap());
            })
        });
    }

    group.finish();
}

/// Benchmark the versioned snapshot round-trip
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_snapshot");

    let art = trained(200, 32);
    group.bench_function("save", |b| {
        b.iter(|| black_box(save_categories(&art).unwrap()))
    });

    let bytes = save_categories(&art).unwrap();
    group.bench_function("load", |b| {
        b.iter(|| black_box(load_categories(black_box(&bytes)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_learn, bench_predict, bench_snapshot);
criterion_main!(benches);
