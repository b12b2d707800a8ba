//! Criterion benchmarks for freight_models.
//!
//! Benchmarks cover:
//! - Log-linear demand curve fitting over growing datasets
//! - Sloped-supply grid search at several resolutions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use freight_models::demand::{DemandCurveFitter, DemandObservation};
use freight_models::equilibrium::EquilibriumSolver;
use freight_models::supply::SupplyCurve;

fn observations(n: usize) -> Vec<DemandObservation> {
    (0..n)
        .map(|i| {
            let price = 2000.0 + 10.0 * i as f64;
            // Deterministic wobble around a -1.3 elasticity
            let noise = 1.0 + 0.02 * ((i * 7919) % 11) as f64 / 11.0;
            DemandObservation::new(price, 3.0e7 * price.powf(-1.3) * noise)
        })
        .collect()
}

/// Benchmark regression fitting.
fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("demand_fit");
    let fitter = DemandCurveFitter::new();

    for n in [10, 100, 1_000] {
        let data = observations(n);
        group.bench_with_input(BenchmarkId::new("log_linear", n), &data, |b, data| {
            b.iter(|| black_box(fitter.fit(black_box(data), false)))
        });
    }

    group.finish();
}

/// Benchmark the equilibrium grid search.
fn bench_equilibrium(c: &mut Criterion) {
    let mut group = c.benchmark_group("equilibrium");
    let curve = DemandCurveFitter::new()
        .fit(&observations(20), false)
        .expect("benchmark data fits");
    let supply = SupplyCurve::sloped(2500.0, 0.5).expect("valid supply");

    for steps in [100, 1_000, 10_000] {
        let solver = EquilibriumSolver::with_steps(steps).expect("non-zero steps");
        group.bench_with_input(BenchmarkId::new("sloped_grid", steps), &solver, |b, solver| {
            b.iter(|| black_box(solver.solve(&curve, &supply, None)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_equilibrium);
criterion_main!(benches);
