use confgrid_core::{
    ClassificationMetrics, ConfusionCounts, GridBounds, OutputConfig, ReportFormat, ZeroDivision,
    write_report,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_metrics(c: &mut Criterion) {
    let counts = ConfusionCounts::new(89, 7, 1, 3);

    c.bench_function("metrics_compute", |b| {
        b.iter(|| ClassificationMetrics::compute(black_box(&counts), ZeroDivision::Zero))
    });

    let degenerate = ConfusionCounts::new(0, 5, 0, 5);
    c.bench_function("metrics_compute_zero_denominator", |b| {
        b.iter(|| ClassificationMetrics::compute(black_box(&degenerate), ZeroDivision::Nan))
    });
}

fn bench_grid(c: &mut Criterion) {
    let bounds = GridBounds::default();
    c.bench_function("grid_iterate_default", |b| {
        b.iter(|| black_box(&bounds).iter().count())
    });

    let large = GridBounds::new(10_000, 7, 1_000);
    c.bench_function("grid_rows_large", |b| {
        b.iter(|| {
            black_box(&large)
                .rows(ZeroDivision::Zero)
                .map(|rows| rows.count())
        })
    });
}

fn bench_report(c: &mut Criterion) {
    let bounds = GridBounds::default();
    let text = OutputConfig::default();
    let json = OutputConfig {
        format: ReportFormat::Json,
        ..OutputConfig::default()
    };

    c.bench_function("report_text_default", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(2048);
            write_report(&mut buf, black_box(&bounds), ZeroDivision::Zero, &text).map(|_| buf)
        })
    });

    c.bench_function("report_json_default", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(8192);
            write_report(&mut buf, black_box(&bounds), ZeroDivision::Zero, &json).map(|_| buf)
        })
    });
}

criterion_group!(benches, bench_metrics, bench_grid, bench_report);
criterion_main!(benches);
