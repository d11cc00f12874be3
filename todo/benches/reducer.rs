//! Todo reducer benchmarks
//!
//! Measures the cost of each operation on lists of a few sizes, plus the
//! round trip through the queued store.
//!
//! Run with: `cargo bench -p todo`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)] // Benchmarks can use expect for setup

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use todo::{Config, Snapshot, TodoAction, TodoEnvironment, TodoId, TodoStore, apply, shared_store};

fn populated(len: usize) -> (Snapshot, TodoEnvironment) {
    let mut store = TodoStore::new();
    for i in 0..len {
        store.add(format!("todo {i}"));
    }
    (store.snapshot(), TodoEnvironment::sequential())
}

/// Benchmark reducer execution in isolation (no store overhead)
fn benchmark_reducer_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");
    group.throughput(Throughput::Elements(1));

    for len in [10usize, 100, 1_000] {
        let (snapshot, env) = populated(len);
        let middle = snapshot.as_slice()[len / 2].id;

        group.bench_with_input(BenchmarkId::new("add", len), &snapshot, |b, snapshot| {
            b.iter(|| apply(snapshot, black_box(TodoAction::add("bench")), &env));
        });

        group.bench_with_input(BenchmarkId::new("toggle_liked", len), &snapshot, |b, snapshot| {
            b.iter(|| apply(snapshot, black_box(TodoAction::ToggleLiked { id: middle }), &env));
        });

        group.bench_with_input(BenchmarkId::new("remove", len), &snapshot, |b, snapshot| {
            b.iter(|| apply(snapshot, black_box(TodoAction::Remove { id: middle }), &env));
        });

        group.bench_with_input(BenchmarkId::new("noop", len), &snapshot, |b, snapshot| {
            b.iter(|| {
                apply(
                    snapshot,
                    black_box(TodoAction::Remove { id: TodoId::new(u64::MAX) }),
                    &env,
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("liked_count", len), &snapshot, |b, snapshot| {
            b.iter(|| black_box(snapshot).liked_count());
        });
    }

    group.finish();
}

/// Benchmark the queued store round trip (send and await reply)
fn benchmark_shared_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_store");
    group.throughput(Throughput::Elements(1));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime");

    group.bench_function("toggle_roundtrip", |b| {
        let store = runtime.block_on(async {
            let store = shared_store(&Config::default());
            store.send(TodoAction::add("a")).await.expect("add");
            store
        });
        let id = TodoId::new(1);

        b.to_async(&runtime).iter(|| async {
            let _ = store.send(black_box(TodoAction::ToggleSaved { id })).await;
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_reducer_execution, benchmark_shared_store);
criterion_main!(benches);
