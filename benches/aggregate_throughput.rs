/// Aggregation throughput benchmarks
///
/// Measures parsing and grouped aggregation over synthetic captured streams,
/// the path taken by solvebench-replay.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use solvebench::aggregate::GroupedAggregator;
use solvebench::record::ResultRecord;
use solvebench::replay::replay;
use std::time::Duration;

/// Captured stream with `groups` problem types of `per_group` records each
fn synthetic_stream(groups: usize, per_group: usize) -> String {
    let mut stream = String::from("# Run as: solvebench ./knapsack -t instances\n");
    for key in 1..=groups {
        for i in 0..per_group {
            let elapsed = (i * 37 + key * 11) % 5000;
            stream.push_str(&format!(
                "119612 30723474 30961478 68093 {} -t gen.{}.500.500.{}\n",
                elapsed, key, i
            ));
        }
        stream.push_str("STATS: 0.000000 0.000000 0 -t 0\n");
    }
    stream
}

fn bench_parse(c: &mut Criterion) {
    let line = "119612 30723474 30961478 68093 17485 -t gen.2.500.500.99";
    c.bench_function("parse_result_line", |b| {
        b.iter(|| ResultRecord::parse(black_box(line)))
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_push");
    group.measurement_time(Duration::from_secs(5));

    for per_group in [10usize, 100, 1000] {
        let records: Vec<ResultRecord> = synthetic_stream(5, per_group)
            .lines()
            .filter_map(|l| ResultRecord::parse(l).ok())
            .collect();
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(per_group),
            &records,
            |b, records| {
                b.iter(|| {
                    let mut agg = GroupedAggregator::new();
                    let mut emitted = 0usize;
                    for record in records {
                        emitted += agg.push(record).is_some() as usize;
                    }
                    emitted += agg.finish().is_some() as usize;
                    black_box(emitted)
                })
            },
        );
    }
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay_stream");
    group.measurement_time(Duration::from_secs(5));

    for per_group in [100usize, 1000] {
        let stream = synthetic_stream(5, per_group);
        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(per_group),
            &stream,
            |b, stream| {
                b.iter(|| {
                    let mut out = Vec::with_capacity(stream.len());
                    replay(black_box(stream.as_bytes()), &mut out).unwrap();
                    black_box(out)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_aggregate, bench_replay);
criterion_main!(benches);
