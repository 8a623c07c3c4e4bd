//! # Circuit and Orchestrator Benchmarks
//!
//! End-to-end cost of one resonance loop and of a full orchestrated
//! sequence presentation.
//!
//! Run: `cargo bench --bench circuit_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use art_laminar::{CircuitParams, LaminarCircuit};
use art_orchestration::{OrchestratorConfig, ResonanceOrchestrator};
use art_temporal::OverflowPolicy;

fn input(dim: usize) -> Vec<f64> {
    (0..dim).map(|i| 0.2 + 0.6 * (i as f64) / (dim as f64)).collect()
}

/// Benchmark one full resonance search
fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_process");
    group.sample_size(20);

    for dim in [8usize, 32, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            let mut circuit = LaminarCircuit::new(CircuitParams {
                input_dim: dim,
                ..Default::default()
            })
            .unwrap();
            let pattern = input(dim);
            b.iter(|| {
                circuit.clear_dynamics();
                black_box(circuit.process(black_box(&pattern)).unwrap());
            })
        });
    }

    group.finish();
}

/// Benchmark an orchestrated three-pattern sequence
fn bench_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("orchestrator_sequence");
    group.sample_size(10);

    group.bench_function("dim8_x3", |b| {
        let config = OrchestratorConfig::with_dim(8, OverflowPolicy::TruncateOldest);
        let mut orch = ResonanceOrchestrator::new(config).unwrap();
        let patterns: Vec<Vec<f64>> = (0..3)
            .map(|k| {
                (0..8)
                    .map(|i| if (i + k) % 3 == 0 { 0.9 } else { 0.1 })
                    .collect()
            })
            .collect();
        b.iter(|| {
            black_box(orch.run_sequence(black_box(&patterns)).unwrap());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_process, bench_sequence);
criterion_main!(benches);
