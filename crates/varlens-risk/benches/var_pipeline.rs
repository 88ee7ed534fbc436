//! Benchmarks for the historical VaR pipeline.

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use varlens_core::{Date, PricePoint, Ticker};
use varlens_risk::{historical_var, simulated_pl, PriceMatrix};

const DAYS: i64 = 252;
const ASSETS: usize = 50;

fn synthetic_points() -> Vec<PricePoint> {
    let base = Date::from_ymd(2023, 1, 2).unwrap();
    let mut points = Vec::with_capacity(DAYS as usize * ASSETS);
    for asset in 0..ASSETS {
        let ticker = Ticker::new(format!("T{asset:03}")).unwrap();
        let mut close = 100.0 + asset as f64;
        for day in 0..DAYS {
            // Deterministic wiggle; skip every 17th day to exercise forward-fill.
            close *= 1.0 + 0.01 * ((day as f64 + asset as f64).sin());
            if (day + asset as i64) % 17 != 0 {
                let date = base.add_days(day).unwrap();
                points.push(PricePoint::new(ticker.clone(), date, close).unwrap());
            }
        }
    }
    points
}

fn bench_pipeline(c: &mut Criterion) {
    let points = synthetic_points();
    let matrix = PriceMatrix::from_points(&points, 252);
    let returns = matrix.returns();
    let weights: BTreeMap<Ticker, f64> = returns
        .tickers()
        .iter()
        .map(|t| (t.clone(), 1.0 / ASSETS as f64))
        .collect();
    let pl = simulated_pl(&returns, &weights, 1_000_000.0);

    let mut group = c.benchmark_group("var_pipeline");

    group.bench_function("price_matrix_252x50", |b| {
        b.iter(|| PriceMatrix::from_points(black_box(&points), 252));
    });

    group.bench_function("returns_252x50", |b| {
        b.iter(|| black_box(&matrix).returns());
    });

    group.bench_function("simulated_pl_252x50", |b| {
        b.iter(|| simulated_pl(black_box(&returns), black_box(&weights), 1_000_000.0));
    });

    group.bench_function("historical_var_251", |b| {
        b.iter(|| historical_var(black_box(&pl), 0.95));
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
