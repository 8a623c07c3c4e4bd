//! # Bipole Network Benchmarks
//!
//! The horizontal pass is O(N²); these benches track the settle schedule
//! and the incremental row/column rebuild on orientation change.
//!
//! Run: `cargo bench --bench bipole_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use art_bipole::{BipoleNetwork, BipoleParams};

fn network(n: usize) -> BipoleNetwork {
    let mut net = BipoleNetwork::new(BipoleParams {
        n,
        ..Default::default()
    })
    .unwrap();
    net.set_direct(n / 4, 0.9).unwrap();
    net.set_direct(n / 2, 0.9).unwrap();
    net
}

/// Benchmark one synchronous step
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("bipole_step");

    for n in [50usize, 200, 800] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut net = network(n);
            b.iter(|| {
                net.step(black_box(2.0));
            })
        });
    }

    group.finish();
}

/// Benchmark the contractual settle schedule (10 iterations)
fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("bipole_settle");

    for n in [50usize, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut net = network(n);
                black_box(net.settle(2.0));
            })
        });
    }

    group.finish();
}

/// Benchmark the local weight rebuild after an orientation change
fn bench_orientation_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("bipole_orientation_rebuild");

    for n in [50usize, 800] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut net = BipoleNetwork::new(BipoleParams {
                n,
                orientation_selectivity: true,
                ..Default::default()
            })
            .unwrap();
            let mut theta = 0.0f64;
            b.iter(|| {
                theta += 0.1;
                net.set_orientation(n / 2, black_box(theta)).unwrap();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_settle, bench_orientation_rebuild);
criterion_main!(benches);
