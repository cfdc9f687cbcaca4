//! Benchmarks for building grids across distributions, centerings and sizes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fvgrid::{CenteringTag, CheckPolicy, DistConfig, DistributionRegistry, GridBuilder, stats};

/// Benchmark configurations: (label, distribution, centering).
fn bench_configs() -> Vec<(&'static str, DistConfig, CenteringTag)> {
    vec![
        ("uniform-face", DistConfig::uniform(), CenteringTag::FaceCentered),
        ("uniform-cell", DistConfig::uniform(), CenteringTag::CellCentered),
        (
            "random-face",
            DistConfig::random_fixed(0.5, 1.5, 1),
            CenteringTag::FaceCentered,
        ),
        (
            "random-cell",
            DistConfig::random_fixed(0.5, 1.5, 1),
            CenteringTag::CellCentered,
        ),
    ]
}

/// Benchmark a full `build` for every configuration at increasing sizes.
fn bench_build(c: &mut Criterion) {
    let registry = DistributionRegistry::with_builtins();
    let mut group = c.benchmark_group("build");

    for (label, config, centering) in bench_configs() {
        for cells in [100usize, 10_000, 100_000] {
            let builder = GridBuilder::new(&registry)
                .cells(cells)
                .domain(0.0, 1.0)
                .centering(centering)
                .configure(config.clone());
            group.bench_function(BenchmarkId::new(label, cells), |b| {
                b.iter(|| black_box(builder.build()))
            });
        }
    }

    group.finish();
}

/// Compare builds with and without runtime invariant checks.
fn bench_checks(c: &mut Criterion) {
    let registry = DistributionRegistry::with_builtins();
    let mut group = c.benchmark_group("checks");

    for (label, policy) in [("enforce", CheckPolicy::Enforce), ("skip", CheckPolicy::Skip)] {
        let builder = GridBuilder::new(&registry)
            .cells(200_000)
            .configure(DistConfig::random_fixed(0.5, 1.5, 3))
            .checks(policy);
        group.bench_function(label, |b| b.iter(|| black_box(builder.build())));
    }

    group.finish();
}

/// Benchmark the full quality report on a large random grid.
fn bench_report(c: &mut Criterion) {
    let registry = DistributionRegistry::with_builtins();
    let grid = GridBuilder::new(&registry)
        .cells(100_000)
        .configure(DistConfig::random_fixed(0.5, 1.5, 5))
        .build()
        .expect("valid grid");

    c.bench_function("report", |b| {
        b.iter(|| stats::Report::of(black_box(&grid), 20))
    });
}

#[allow(missing_docs, clippy::missing_docs_in_private_items)]
mod bench_defs {
    use super::*;
    criterion_group!(benches, bench_build, bench_checks, bench_report);
}

pub use bench_defs::benches;
criterion_main!(benches);
