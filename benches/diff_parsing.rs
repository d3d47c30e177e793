//! Diff parsing benchmarks for suggestion-bot.
//!
//! These benchmarks measure the performance of:
//! - Line classification (classify_line)
//! - Unified diff parsing (parse_diff)
//! - Suggestion building (make_comments)

mod common;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use common::generate_diff;
use suggestion_bot::{classify_line, make_comments, parse_diff};

/// Benchmark line classification.
///
/// Tests the classify_line function which determines line type (Added, Removed, Context, etc.)
/// and extracts content without the prefix.
fn bench_classify_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_parsing/classify_line");

    let test_lines = [
        ("header", "@@ -1,10 +1,12 @@"),
        ("meta_diff", "diff --git a/file.rs b/file.rs"),
        ("meta_plus", "+++ b/file.rs"),
        ("meta_minus", "--- a/file.rs"),
        ("added", "+    let x = foo();"),
        ("removed", "-    let y = bar();"),
        ("context", "     fn main() {"),
        ("no_newline", "\\ No newline at end of file"),
    ];

    for (name, line) in test_lines {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| black_box(classify_line(black_box(line))));
        });
    }

    group.finish();
}

/// Benchmark parsing whole diffs of growing size.
fn bench_parse_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_parsing/parse_diff");

    for file_count in [1, 10, 100] {
        let diff = generate_diff(file_count, 8);

        group.throughput(Throughput::Bytes(diff.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(file_count),
            &diff,
            |b, diff| {
                b.iter(|| black_box(parse_diff(black_box(diff))));
            },
        );
    }

    group.finish();
}

/// Benchmark the full diff to suggestions pipeline.
///
/// Compares few large files against many small ones at a similar hunk count.
fn bench_make_comments(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_parsing/make_comments");

    for (name, files, hunks) in [("wide", 200, 2), ("deep", 4, 100)] {
        let diff = generate_diff(files, hunks);

        group.throughput(Throughput::Elements((files * hunks) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &diff, |b, diff| {
            b.iter(|| black_box(make_comments(black_box(diff))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classify_line,
    bench_parse_diff,
    bench_make_comments,
);
criterion_main!(benches);
