use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use tailrisk::backtest::{backtest_forecasts, christoffersen_test};
use tailrisk::core::{Forecast, InnovationDistribution};
use tailrisk::risk::var_forecast_series;

fn synthetic_forecasts(n: usize) -> Vec<Forecast> {
    let t6 = InnovationDistribution::student_t(6.0).expect("valid degrees of freedom");
    (0..n)
        .map(|i| {
            let sigma = 0.008 + 0.004 * ((i % 50) as f64 / 50.0);
            Forecast::new(0.0002, sigma, t6).expect("valid forecast")
        })
        .collect()
}

fn synthetic_violations(n: usize) -> Vec<bool> {
    (0..n).map(|i| i % 21 == 0).collect()
}

fn bench_var_forecast_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("var_forecast_series");
    for n in [250usize, 2500] {
        let forecasts = synthetic_forecasts(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &forecasts, |b, f| {
            b.iter(|| {
                let vars = var_forecast_series(black_box(f), black_box(0.05))
                    .expect("series should compute");
                black_box(vars)
            })
        });
    }
    group.finish();
}

fn bench_christoffersen(c: &mut Criterion) {
    let hits = synthetic_violations(2500);
    c.bench_function("christoffersen_2500", |b| {
        b.iter(|| {
            let test = christoffersen_test(black_box(&hits), black_box(0.05))
                .expect("test should compute");
            black_box(test.lr_conditional)
        })
    });
}

fn bench_full_backtest(c: &mut Criterion) {
    let n = 2500;
    let forecasts = synthetic_forecasts(n);
    let realized: Vec<f64> = (0..n)
        .map(|i| if i % 21 == 0 { -0.06 } else { 0.0004 })
        .collect();

    c.bench_function("backtest_forecasts_2500", |b| {
        b.iter(|| {
            let report =
                backtest_forecasts(black_box(&realized), black_box(&forecasts), black_box(0.05))
                    .expect("backtest should compute");
            black_box(report.breach_rate)
        })
    });
}

criterion_group!(
    benches,
    bench_var_forecast_series,
    bench_christoffersen,
    bench_full_backtest
);
criterion_main!(benches);
