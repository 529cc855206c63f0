use criterion::{criterion_group, criterion_main, Criterion};
use microbench::workload::{Benchmark, CallGraph, Traced, Untraced};
use microbench::{black_box, Runner};

fn bench_runner(c: &mut Criterion) {
    let runner = Runner::new();

    let mut group = c.benchmark_group("runner");
    group.sample_size(30);
    group.bench_function("empty_workload_100", |b| {
        b.iter(|| black_box(runner.measure(|| (), 100)));
    });
    group.bench_function("empty_workload_fallible_100", |b| {
        b.iter(|| black_box(runner.run(|| Ok::<(), ()>(()), 100)));
    });
    group.finish();
}

fn bench_probes(c: &mut Criterion) {
    // Small graph: 1 + 8 + 64 + 512 frames per sample.
    let graph = CallGraph::new(3, 8, 1).unwrap();

    let mut group = c.benchmark_group("call_graph");
    group.bench_function("untraced", |b| {
        b.iter(|| graph.sample(&Untraced));
    });
    // No subscriber is installed, so this is the cost of disabled spans.
    group.bench_function("traced_no_subscriber", |b| {
        b.iter(|| graph.sample(&Traced));
    });
    group.finish();
}

criterion_group!(benches, bench_runner, bench_probes);
criterion_main!(benches);
