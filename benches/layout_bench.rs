// Benchmark for the column layout
// Measures compute_columns over dense days of increasing size

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use time_block_planner::services::layout::compute_columns;
use time_block_planner::utils::time::Minutes;

/// Deterministic spread of overlapping spans across the working day
fn dense_day(count: usize) -> Vec<(Minutes, Minutes)> {
    (0..count as Minutes)
        .map(|i| {
            let start = 360 + (i * 37) % 900;
            let length = 15 + (i * 13) % 105;
            (start, start + length)
        })
        .collect()
}

fn bench_compute_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_columns");

    for count in [10, 100, 1000].iter() {
        let spans = dense_day(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &spans, |b, spans| {
            b.iter(|| compute_columns(black_box(spans)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_columns);
criterion_main!(benches);
