//! Store Throughput Benchmark
//!
//! Measures the cost of the operations behind the HTTP endpoints:
//! - Sequential note creation
//! - Listing a page from a populated store at increasing offsets

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use notes_core::{NewNote, PageRequest};
use notes_store::NoteStore;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build benchmark runtime")
}

fn populated_store(rt: &Runtime, count: usize) -> NoteStore {
    let store = NoteStore::in_memory();
    rt.block_on(async {
        for i in 0..count {
            store
                .create(NewNote::new(
                    format!("Note {i}"),
                    format!("Body of note {i} with a little text in it."),
                ))
                .await
                .expect("create failed");
        }
    });
    store
}

/// Benchmarks creating notes in batches
fn create_benchmark(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("create");

    for batch in [100usize, 1_000] {
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("notes", batch), &batch, |b, &batch| {
            b.iter(|| black_box(populated_store(&rt, batch)))
        });
    }

    group.finish();
}

/// Benchmarks listing one page out of a 10,000 note store
fn list_benchmark(c: &mut Criterion) {
    let rt = runtime();
    let store = populated_store(&rt, 10_000);
    let mut group = c.benchmark_group("list");

    for page in [1u32, 50, 199] {
        group.bench_with_input(BenchmarkId::new("page", page), &page, |b, &page| {
            b.iter(|| rt.block_on(store.list(black_box(PageRequest::new(page, 50)))))
        });
    }

    group.finish();
}

criterion_group!(benches, create_benchmark, list_benchmark);
criterion_main!(benches);
