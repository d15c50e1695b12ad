// Digest and mining benchmarks for proofchain.
//
// Covers the raw entry digest, the nonce search at a few low difficulties,
// and a full produce (mine + append) against a growing store.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use proofchain::crypto::hash::entry_digest;
use proofchain::mining::{CancelFlag, EntryProducer, Miner, MinerConfig};
use proofchain::storage::{ChainStore, Entry};

fn bench_entry_digest(c: &mut Criterion) {
    let prev = "0".repeat(64);
    c.bench_function("sha256/entry_digest", |b| {
        b.iter(|| entry_digest(42, "2026-10-19T12:00:00.000000000Z", 1234, &prev, "ff"));
    });
}

fn bench_mine(c: &mut Criterion) {
    let genesis = Entry::genesis(1);
    let cancel = CancelFlag::new();
    let mut group = c.benchmark_group("mining/mine");

    for difficulty in [0u32, 1, 2, 3] {
        let miner = Miner::new(MinerConfig::with_difficulty(difficulty));
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &difficulty,
            |b, _| {
                b.iter(|| miner.mine(&genesis, 7, &cancel));
            },
        );
    }
    group.finish();
}

fn bench_produce(c: &mut Criterion) {
    let store = Arc::new(ChainStore::initialize(1));
    let producer = EntryProducer::new(store, Miner::new(MinerConfig::with_difficulty(1)));

    c.bench_function("producer/produce_d1", |b| {
        b.iter(|| producer.produce(1));
    });
}

criterion_group!(benches, bench_entry_digest, bench_mine, bench_produce);
criterion_main!(benches);
