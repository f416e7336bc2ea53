//! Performance benchmarks for batch runs

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use recordkeep::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

async fn seeded_store(count: usize) -> SharedStore {
    let store = MemoryStore::new();
    for n in 1..=count {
        store
            .save(Item::new(
                format!("Item{}", n),
                format!("Desc{}", n),
                format!("item{}@email.com", n),
            ))
            .await
            .expect("Failed to seed item");
    }
    Arc::new(store)
}

/// Full fan-out/fan-in with no simulated work
fn bench_run_batch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("run_batch");

    for size in [10usize, 100, 1000] {
        let store = rt.block_on(seeded_store(size));
        let coordinator = BatchCoordinator::with_delay(store, Duration::ZERO);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.to_async(&rt).iter(|| async { coordinator.run_batch().await })
        });
    }

    group.finish();
}

/// Concurrent appends into one accumulator
fn bench_accumulator(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let item = Item::new("Item1", "Desc1", "item1@email.com").with_id(1);

    c.bench_function("accumulator_append_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let acc = Arc::new(ResultAccumulator::new());
            let handles: Vec<_> = (0..1000)
                .map(|index| {
                    let acc = acc.clone();
                    let item = item.clone();
                    tokio::spawn(async move { acc.append(index, item) })
                })
                .collect();
            for handle in handles {
                handle.await.unwrap();
            }
            acc.take_ordered()
        })
    });
}

/// File store writes, which dominate real runs
fn bench_json_store_save(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let temp = tempfile::TempDir::new().expect("Failed to create temp dir");
    let store = rt
        .block_on(JsonFileStore::open(temp.path().join("bench.json")))
        .expect("Failed to open store");
    rt.block_on(async {
        for n in 1..=100 {
            store
                .save(Item::new(format!("Item{}", n), "", "a@b.io"))
                .await
                .unwrap();
        }
    });

    c.bench_function("json_store_save_100_items", |b| {
        b.to_async(&rt).iter(|| async {
            store
                .save(Item::new("Item1", "", "a@b.io").with_id(1))
                .await
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_run_batch,
    bench_accumulator,
    bench_json_store_save
);
criterion_main!(benches);
