use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use solar_insights::analyzers::{box_stats, histogram, summarize};
use solar_insights::models::{
    FilterSpec, Metric, MetricRange, Record, RecordSet, TableSchema, UnifiedTable,
};
use solar_insights::processors::FilterEngine;
use solar_insights::readers::SourceReader;

const SOURCES: [&str; 3] = ["Benin", "Sierra Leone", "Togo"];

// Synthetic day curve per source, one row per minute
fn create_test_table(rows_per_source: usize) -> UnifiedTable {
    let mut records = Vec::with_capacity(rows_per_source * SOURCES.len());
    for (i, source) in SOURCES.iter().enumerate() {
        for row in 0..rows_per_source {
            let minute = (row % 1440) as f64;
            let ghi = (1000.0 * (minute / 1440.0 * std::f64::consts::PI).sin() - 10.0 * i as f64).max(0.0);
            records.push(
                Record::new(*source)
                    .with_metric(Metric::Ghi, ghi)
                    .with_metric(Metric::Dni, ghi * 0.7)
                    .with_metric(Metric::Dhi, ghi * 0.2)
                    .with_coordinates(9.0 - i as f64, 2.0 - i as f64),
            );
        }
    }

    UnifiedTable::from_records(
        SOURCES.iter().map(|s| s.to_string()).collect(),
        records,
        TableSchema::from_headers(["GHI", "DNI", "DHI", "latitude", "longitude"]),
    )
    .unwrap()
}

fn create_test_csv(rows: usize) -> String {
    let mut text = String::from("Timestamp,GHI,DNI,DHI,Tamb\n");
    for row in 0..rows {
        text.push_str(&format!(
            "2021-08-09 {:02}:{:02},{},{},{},26.5\n",
            (row / 60) % 24,
            row % 60,
            row % 900,
            row % 600,
            row % 200
        ));
    }
    text
}

fn benchmark_filter(c: &mut Criterion) {
    let table = create_test_table(10_000);
    let spec = FilterSpec::new(
        ["Benin", "Togo"],
        Metric::Ghi,
        MetricRange::new(100.0, 800.0).unwrap(),
    );

    c.bench_function("filter_engine", |b| {
        b.iter(|| black_box(FilterEngine::filter(&table, &spec).len()))
    });
}

fn benchmark_summaries(c: &mut Criterion) {
    let table = create_test_table(10_000);

    c.bench_function("summarize", |b| {
        b.iter(|| black_box(summarize(&table, Metric::Ghi).groups.len()))
    });

    c.bench_function("box_stats", |b| {
        b.iter(|| black_box(box_stats(&table, Metric::Dni).len()))
    });

    c.bench_function("histogram", |b| {
        b.iter(|| black_box(histogram(&table, Metric::Dhi, 20).map(|h| h.bins()).unwrap_or(0)))
    });
}

fn benchmark_csv_parsing(c: &mut Criterion) {
    let text = create_test_csv(5_000);
    let reader = SourceReader::new();

    c.bench_function("parse_source_csv", |b| {
        b.iter(|| {
            let data = reader.parse_csv("Benin", black_box(&text), "benin.csv").unwrap();
            black_box(data.records.len())
        })
    });
}

fn benchmark_varying_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_summarize_by_size");

    for &size in &[1_000, 10_000, 50_000] {
        group.bench_with_input(BenchmarkId::new("rows_per_source", size), &size, |b, &rows| {
            let table = create_test_table(rows);
            let spec = FilterSpec::new(SOURCES, Metric::Ghi, MetricRange::new(0.0, 500.0).unwrap());

            b.iter(|| {
                let filtered = FilterEngine::filter(&table, &spec);
                black_box(summarize(&filtered, spec.metric).groups.len())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_filter,
    benchmark_summaries,
    benchmark_csv_parsing,
    benchmark_varying_data_sizes
);
criterion_main!(benches);
