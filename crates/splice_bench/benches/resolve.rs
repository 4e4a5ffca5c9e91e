//! Publish and resolve benchmarks over an in-memory ledger.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::RngCore;
use splice_core::{ContentPublisher, ContentResolver, StoreConfig, WriteContext};
use splice_ledger::{InMemoryLedger, OwnerKey};
use std::sync::Arc;

fn random_content(len: usize) -> Vec<u8> {
    let mut content = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut content);
    content
}

fn ctx() -> WriteContext {
    WriteContext::new(OwnerKey::from_bytes([1; 32]), [2; 32])
}

fn bench_publish(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish");
    let config = StoreConfig::default();

    for len in [1024, 100 * 1024, 1024 * 1024] {
        let content = random_content(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &content, |b, content| {
            b.iter(|| {
                let ledger = Arc::new(InMemoryLedger::new());
                let publisher = ContentPublisher::new(ledger, config.clone()).unwrap();
                let receipt = publisher
                    .publish("video/mp4", black_box(content), &ctx())
                    .unwrap();
                black_box(receipt);
            });
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let config = StoreConfig::default();

    for len in [1024, 100 * 1024, 1024 * 1024] {
        let ledger = Arc::new(InMemoryLedger::new());
        let publisher = ContentPublisher::new(ledger.clone(), config.clone()).unwrap();
        let receipt = publisher
            .publish("video/mp4", &random_content(len), &ctx())
            .unwrap();
        let resolver = ContentResolver::new(ledger, &config);

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &receipt.id, |b, id| {
            b.iter(|| {
                let resolved = resolver.resolve(black_box(id)).unwrap();
                black_box(resolved);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_publish, bench_resolve);
criterion_main!(benches);
