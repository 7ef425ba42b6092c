//! Benchmarks for curve queries and transforms.
//!
//! Run with: cargo bench -p curvelab-curves

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use curvelab_core::types::Date;
use curvelab_curves::prelude::*;

fn nodes(n: usize) -> Vec<(Date, f64)> {
    let base = Date::from_ymd(2024, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let days = 30 * i as i64;
            (base + days, (-0.045 * days as f64 / 365.0).exp())
        })
        .collect()
}

fn discount<T: Number>(interpolation: Interpolation, n: usize, caching: bool) -> Curve<T> {
    CurveBuilder::discount()
        .id("bench")
        .interpolation(interpolation)
        .caching(caching)
        .nodes(nodes(n))
        .build::<T>()
        .unwrap()
}

// =============================================================================
// Point queries
// =============================================================================

fn bench_df_by_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("df_uncached");
    let query = Date::from_ymd(2025, 3, 17).unwrap();
    for interpolation in Interpolation::ALL {
        let curve = discount::<f64>(interpolation, 40, false);
        group.bench_function(BenchmarkId::new("f64", interpolation), |b| {
            b.iter(|| curve.df(black_box(query)).unwrap());
        });
    }
    group.finish();
}

fn bench_df_by_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("df_ad_order");
    let query = Date::from_ymd(2025, 3, 17).unwrap();
    for n in [10usize, 40] {
        let f = discount::<f64>(Interpolation::LogLinear, n, false);
        group.bench_with_input(BenchmarkId::new("f64", n), &f, |b, curve| {
            b.iter(|| curve.df(black_box(query)).unwrap());
        });
        let d1 = discount::<Dual>(Interpolation::LogLinear, n, false);
        group.bench_with_input(BenchmarkId::new("dual", n), &d1, |b, curve| {
            b.iter(|| curve.df(black_box(query)).unwrap());
        });
        let d2 = discount::<Dual2>(Interpolation::LogLinear, n, false);
        group.bench_with_input(BenchmarkId::new("dual2", n), &d2, |b, curve| {
            b.iter(|| curve.df(black_box(query)).unwrap());
        });
    }
    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let curve = discount::<Dual>(Interpolation::Spline, 40, true);
    let query = Date::from_ymd(2025, 3, 17).unwrap();
    curve.df(query).unwrap();
    c.bench_function("df_cached_dual_spline", |b| {
        b.iter(|| curve.df(black_box(query)).unwrap());
    });
}

// =============================================================================
// Mutation
// =============================================================================

fn bench_spline_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("spline_update_and_query");
    let query = Date::from_ymd(2025, 3, 17).unwrap();
    for n in [10usize, 40] {
        let curve = discount::<Dual>(Interpolation::Spline, n, true);
        let values: Vec<f64> = nodes(n).into_iter().map(|(_, v)| v).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                curve.set_values(values).unwrap();
                curve.df(black_box(query)).unwrap()
            });
        });
    }
    group.finish();
}

// =============================================================================
// Transforms
// =============================================================================

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transformed_df");
    let query = Date::from_ymd(2024, 12, 2).unwrap();
    let a: SharedCurve<f64> = Arc::new(discount::<f64>(Interpolation::LogLinear, 20, true));
    let b: SharedCurve<f64> = Arc::new(discount::<f64>(Interpolation::Linear, 20, true));

    for method in [CompoundingMethod::Exact, CompoundingMethod::Approximate] {
        let composite = CompositeCurve::new(vec![a.clone(), b.clone()], method).unwrap();
        group.bench_function(BenchmarkId::new("composite", method), |bench| {
            bench.iter(|| composite.df(black_box(query)).unwrap());
        });
    }

    let shifted = a.shift(0.1).unwrap();
    group.bench_function("shifted", |bench| {
        bench.iter(|| shifted.df(black_box(query)).unwrap());
    });
    let rolled = a.roll_days(30).unwrap();
    group.bench_function("rolled", |bench| {
        bench.iter(|| rolled.df(black_box(query)).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_df_by_interpolation,
    bench_df_by_order,
    bench_cache,
    bench_spline_resolve,
    bench_transforms,
);
criterion_main!(benches);
