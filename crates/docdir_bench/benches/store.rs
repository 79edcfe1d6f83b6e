//! Store operation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docdir_bench::random_payload;
use docdir_core::{Config, Store};
use docdir_testkit::SampleDocument;
use tempfile::TempDir;

fn document(id: u64, size: usize) -> SampleDocument {
    SampleDocument {
        id,
        name: format!("doc-{id}"),
        payload: random_payload(size),
    }
}

fn open(sync_writes: bool) -> (TempDir, Store) {
    let temp = TempDir::new().unwrap();
    let store =
        Store::open_with_config(temp.path().join("db"), Config::new().sync_writes(sync_writes))
            .unwrap();
    (temp, store)
}

/// Benchmark single-document writes without fsync.
fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_write");

    for size in [64, 1024, 16 * 1024].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let (_temp, store) = open(false);
            let doc = document(1, size);

            b.iter(|| {
                store.write("bench", "doc", black_box(&doc)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark single-document writes with fsync.
fn bench_write_synced(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_write_synced");
    group.sample_size(20);

    group.bench_function("1024", |b| {
        let (_temp, store) = open(true);
        let doc = document(1, 1024);

        b.iter(|| {
            store.write("bench", "doc", black_box(&doc)).unwrap();
        });
    });

    group.finish();
}

/// Benchmark single-document reads.
fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_read");

    for size in [64, 1024, 16 * 1024].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let (_temp, store) = open(false);
            store.write("bench", "doc", &document(1, size)).unwrap();

            b.iter(|| {
                let doc: SampleDocument = store.read("bench", black_box("doc")).unwrap();
                black_box(doc);
            });
        });
    }

    group.finish();
}

/// Benchmark reading whole collections.
fn bench_read_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_read_all");

    for count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let (_temp, store) = open(false);
            for i in 0..count as u64 {
                store
                    .write("bench", &format!("doc-{i}"), &document(i, 256))
                    .unwrap();
            }

            b.iter(|| {
                let docs = store.read_all(black_box("bench")).unwrap();
                black_box(docs);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_write,
    bench_write_synced,
    bench_read,
    bench_read_all,
);
criterion_main!(benches);
