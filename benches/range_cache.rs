//! Benchmarks for cached and uncached range sums

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use range_gate::cache::range_sum;
use range_gate::driver::bench::{generate_array, generate_operations, Operation};
use range_gate::{CachedRangeSum, Config};
use std::hint::black_box;

fn workload() -> (Vec<i64>, Vec<Operation>) {
    let config = Config {
        array_len: 10_000,
        query_count: 5_000,
        ..Config::default()
    };
    let mut rng = StdRng::seed_from_u64(config.seed);
    let array = generate_array(&mut rng, config.array_len);
    let ops = generate_operations(&mut rng, &config).unwrap();
    (array, ops)
}

fn bench_uncached(c: &mut Criterion) {
    let (array, ops) = workload();

    c.bench_function("range_sum_uncached", |b| {
        b.iter(|| {
            let mut values = array.clone();
            for op in &ops {
                match *op {
                    Operation::Range { left, right } => {
                        black_box(range_sum(&values, left, right).unwrap());
                    }
                    Operation::Update { index, value } => values[index] = value,
                }
            }
        });
    });
}

fn bench_cached(c: &mut Criterion) {
    let (array, ops) = workload();

    c.bench_function("range_sum_cached", |b| {
        b.iter(|| {
            let mut cached = CachedRangeSum::new(array.clone(), 1000).unwrap();
            for op in &ops {
                match *op {
                    Operation::Range { left, right } => {
                        black_box(cached.range_sum(left, right).unwrap());
                    }
                    Operation::Update { index, value } => cached.update(index, value).unwrap(),
                }
            }
        });
    });
}

criterion_group!(benches, bench_uncached, bench_cached);
criterion_main!(benches);
