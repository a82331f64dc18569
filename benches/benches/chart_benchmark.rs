//! Chart construction, metrics and export benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quoteboard_bench::{SIZES, snapshot_for, synthetic_series};
use quoteboard_lib::{ChartBuilder, OhlcPolicy, OutputFormat, PeriodMetrics, simple_moving_average};
use std::fs::File;
use std::hint::black_box;
use std::io::BufWriter;

fn chart_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart");

    for (name, days) in SIZES {
        let series = synthetic_series("PLTR", days);
        group.throughput(Throughput::Elements(days as u64));

        for policy in [OhlcPolicy::Synthetic, OhlcPolicy::Reported] {
            let builder = ChartBuilder::new().with_policy(policy);
            group.bench_with_input(BenchmarkId::new(policy.as_str(), name), &series, |b, s| {
                b.iter(|| builder.build(black_box(s)));
            });
        }

        let closes = series.closes();
        group.bench_with_input(BenchmarkId::new("sma-only", name), &closes, |b, closes| {
            b.iter(|| simple_moving_average(black_box(closes), 5));
        });
    }

    group.finish();
}

fn metrics_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    let quotes = snapshot_for("PLTR");

    for (name, days) in SIZES {
        let series = synthetic_series("PLTR", days);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &series, |b, s| {
            b.iter(|| PeriodMetrics::compute(black_box(s), &quotes, "PLTR"));
        });
    }

    group.finish();
}

fn export_benchmark(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let series = synthetic_series("PLTR", 2520);
    let chart = ChartBuilder::new()
        .build(&series)
        .expect("default period is valid");

    let mut group = c.benchmark_group("export");
    group.throughput(Throughput::Elements(chart.len() as u64));

    for format in OutputFormat::all() {
        let path = dir.path().join(format!("chart.{}", format.extension()));
        group.bench_function(format.extension(), |b| {
            b.iter(|| {
                let file = File::create(&path).expect("Failed to create output");
                format.write_chart(&chart, BufWriter::new(file))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, chart_benchmark, metrics_benchmark, export_benchmark);
criterion_main!(benches);
