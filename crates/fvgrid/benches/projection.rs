//! Benchmarks for the bounded simplex projection behind random spacing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fvgrid::distribution::random::project_bounded_simplex;

/// Deterministic weights in `[0, spread)` from a small LCG.
fn weights(n: usize, spread: f64) -> Vec<f64> {
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            spread * (state >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect()
}

/// Narrow spreads converge in one pass; wide spreads pin many entries.
fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for (label, spread) in [("narrow", 1.2), ("wide", 20.0)] {
        for n in [1_000usize, 100_000] {
            let w = weights(n, spread);
            group.bench_function(BenchmarkId::new(label, n), |b| {
                b.iter(|| project_bounded_simplex(black_box(&w), 0.5, 1.5, n as f64))
            });
        }
    }

    group.finish();
}

#[allow(missing_docs, clippy::missing_docs_in_private_items)]
mod bench_defs {
    use super::*;
    criterion_group!(benches, bench_projection);
}

pub use bench_defs::benches;
criterion_main!(benches);
