//! Performance benchmarks for log analysis
//!
//! Tests scan time for logs of different sizes and the cost of the
//! longest-common-prefix comparison on long texts.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sse_audit::analyzer::{analyze_reader, common_prefix};

/// Generate a synthetic log: `parts` parts per message, each growing
/// additively over `updates` updates, interleaved with unrelated lines.
fn generate_log(parts: usize, updates: usize) -> String {
    let mut log = String::new();
    for part in 0..parts {
        let mut text = String::new();
        for _ in 0..updates {
            text.push_str("lorem ipsum dolor sit amet ");
            log.push_str("2026-01-04T12:00:00Z DEBUG stream: unrelated noise line\n");
            log.push_str(&format!(
                r#"2026-01-04T12:00:00Z DEBUG stream: SSE line: data: {{"type":"message.part.updated","properties":{{"part":{{"messageID":"m{}","id":"p{}","type":"text","text":"{}"}}}}}}"#,
                part % 4,
                part,
                text
            ));
            log.push('\n');
        }
    }
    log
}

fn bench_analyze_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_log");

    for (parts, updates) in [(1, 50), (4, 50), (16, 100)] {
        let log = generate_log(parts, updates);
        group.throughput(Throughput::Bytes(log.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}_updates", parts, updates)),
            &log,
            |b, log| {
                b.iter(|| {
                    let result = analyze_reader(black_box(log.as_bytes())).unwrap();
                    black_box(result)
                })
            },
        );
    }

    group.finish();
}

fn bench_common_prefix(c: &mut Criterion) {
    let mut group = c.benchmark_group("common_prefix");

    for size in [100usize, 10_000] {
        let base: String = "x".repeat(size);
        let diverged = format!("{}y", &base[..size - 1]);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_chars", size)),
            &(base, diverged),
            |b, (base, diverged)| {
                b.iter(|| black_box(common_prefix(black_box(base), black_box(diverged))))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_analyze_log, bench_common_prefix);
criterion_main!(benches);
