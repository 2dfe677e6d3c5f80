// Digest, chain, and mining benchmarks for chainlab.
//
// Covers the digest over growing inputs, a full demo recompute, verifying
// chains of various heights, and a short mining run.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chainlab::chain::{Chain, ChainModel};
use chainlab::config::MinerConfig;
use chainlab::digest::digest_str;
use chainlab::pow::Miner;

fn bench_digest_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest/input_size");
    for size in [16usize, 256, 4096] {
        let input = "a".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| digest_str(input));
        });
    }
    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let model = ChainModel::default();
    c.bench_function("chain/recompute", |b| {
        b.iter(|| model.recompute("Transacción A: 51 BTC"));
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain/verify");
    for height in [2usize, 32, 512] {
        let mut chain = Chain::new("genesis");
        for i in 1..height {
            chain.append(format!("record {}", i));
        }
        group.bench_with_input(BenchmarkId::from_parameter(height), &chain, |b, chain| {
            b.iter(|| chain.verify());
        });
    }
    group.finish();
}

fn bench_mining(c: &mut Criterion) {
    let config = MinerConfig {
        difficulty: "00".to_string(),
        ..MinerConfig::default()
    };
    c.bench_function("pow/mine_two_zeros", |b| {
        b.iter(|| Miner::new(config.clone()).map(|mut m| m.run_to_completion()));
    });
}

criterion_group!(
    benches,
    bench_digest_sizes,
    bench_recompute,
    bench_verify,
    bench_mining
);
criterion_main!(benches);
