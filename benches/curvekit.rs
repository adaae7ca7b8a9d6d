//! CurveKit path parsing benchmarks
//!
//! Run with: cargo bench -p curvekit-bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use curvekit_bench::{generate_path, generate_points};
use curvekit_path::{assemble, parse, parse_floats, parse_path, parse_points, PathData};

fn tokenizer_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");

    let compact = "1.5.5-3e2,4 10-20.25.75 0 01 5 5";
    group.throughput(Throughput::Bytes(compact.len() as u64));
    group.bench_with_input(BenchmarkId::new("parse_floats", "compact"), compact, |b, input| {
        b.iter(|| parse_floats(input))
    });

    let points = generate_points(1000);
    group.throughput(Throughput::Bytes(points.len() as u64));
    group.bench_with_input(BenchmarkId::new("parse_points", "1000"), &points, |b, input| {
        b.iter(|| parse_points(input))
    });

    group.finish();
}

fn command_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("commands");

    for n in [10, 100, 1000] {
        let d = generate_path(n);
        group.throughput(Throughput::Bytes(d.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_path", n), &d, |b, d| {
            b.iter(|| parse_path(d))
        });
    }

    group.finish();
}

fn assembly_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    for n in [10, 100, 1000] {
        let d = generate_path(n);
        let parsed = parse_path(&d).expect("generated path data parses");
        group.bench_with_input(BenchmarkId::new("assemble", n), &parsed.commands, |b, commands| {
            b.iter(|| {
                let mut data = PathData::new();
                assemble(commands, &mut data);
                data
            })
        });

        group.throughput(Throughput::Bytes(d.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", n), &d, |b, d| b.iter(|| parse(d)));
    }

    group.finish();
}

criterion_group!(benches, tokenizer_benchmarks, command_benchmarks, assembly_benchmarks);
criterion_main!(benches);
