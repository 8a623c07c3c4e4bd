//! # Shunting Field Benchmarks
//!
//! Measures the numerical core: field evolution under both integrators,
//! equilibrium computation, and transmitter updates.
//!
//! Run: `cargo bench --bench shunting_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use art_core::dynamics::IntegratorKind;
use art_core::prelude::*;

fn driven_field(dim: usize, integrator: IntegratorKind) -> ShuntingField {
    let params = ShuntingParams {
        integrator,
        ..Default::default()
    };
    let mut field = ShuntingField::new(dim, params).unwrap();
    let drive: Vec<f64> = (0..dim).map(|i| (i % 10) as f64 / 10.0).collect();
    field.set_excitatory(&drive).unwrap();
    field.set_inhibitory(&vec![0.2; dim]).unwrap();
    field
}

/// Benchmark one evolve step across field sizes and integrators
fn bench_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("shunting_evolve");

    for dim in [16usize, 64, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("euler", dim), &dim, |b, &dim| {
            let mut field = driven_field(dim, IntegratorKind::Euler);
            b.iter(|| {
                field.evolve(black_box(1.0)).unwrap();
            })
        });
        group.bench_with_input(BenchmarkId::new("rk4", dim), &dim, |b, &dim| {
            let mut field = driven_field(dim, IntegratorKind::Rk4);
            b.iter(|| {
                field.evolve(black_box(1.0)).unwrap();
            })
        });
    }

    group.finish();
}

/// Benchmark the closed-form equilibrium
fn bench_equilibrium(c: &mut Criterion) {
    let mut group = c.benchmark_group("shunting_equilibrium");

    for dim in [64usize, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            let field = driven_field(dim, IntegratorKind::Euler);
            b.iter(|| black_box(field.equilibrium()))
        });
    }

    group.finish();
}

/// Benchmark transmitter habituation
fn bench_transmitter(c: &mut Criterion) {
    let mut group = c.benchmark_group("transmitter_evolve");

    for dim in [64usize, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            let mut pool = TransmitterPool::new(dim, TransmitterParams::default()).unwrap();
            let signal = vec![0.7; dim];
            b.iter(|| {
                pool.evolve(black_box(&signal), 1.0).unwrap();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evolve, bench_equilibrium, bench_transmitter);
criterion_main!(benches);
