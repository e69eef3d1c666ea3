//! Range Sum Benchmark
//!
//! Generates a seeded mix of range queries and point updates, runs it
//! against a raw array and against [`CachedRangeSum`], and reports timings.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{range_sum, CacheStats, CachedRangeSum};
use crate::config::Config;
use crate::error::{Error, Result};

// == Workload ==
/// One benchmark step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Range { left: usize, right: usize },
    Update { index: usize, value: i64 },
}

/// Fills an array of `len` values in `1..=100`.
pub fn generate_array(rng: &mut impl Rng, len: usize) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(1..=100)).collect()
}

/// Builds the operation stream described by `config`.
///
/// Hot ranges straddle the middle of the array so they are wide and likely
/// to be invalidated by updates.
pub fn generate_operations(rng: &mut impl Rng, config: &Config) -> Result<Vec<Operation>> {
    let n = config.array_len;
    if n == 0 {
        return Err(Error::Config("ARRAY_LEN must be positive".to_string()));
    }

    let hot: Vec<(usize, usize)> = (0..config.hot_pool)
        .map(|_| (rng.gen_range(0..=n / 2), rng.gen_range(n / 2..n)))
        .collect();

    let mut ops = Vec::with_capacity(config.query_count);
    for _ in 0..config.query_count {
        if rng.gen_bool(config.p_update) {
            ops.push(Operation::Update {
                index: rng.gen_range(0..n),
                value: rng.gen_range(1..=100),
            });
            continue;
        }

        let hot_pick = if rng.gen_bool(config.p_hot) {
            hot.choose(&mut *rng).copied()
        } else {
            None
        };
        let (left, right) = match hot_pick {
            Some(range) => range,
            None => {
                let left = rng.gen_range(0..n);
                (left, rng.gen_range(left..n))
            }
        };
        ops.push(Operation::Range { left, right });
    }
    Ok(ops)
}

// == Report ==
/// Outcome of one benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub array_len: usize,
    pub operations: usize,
    pub updates: usize,
    pub capacity: usize,
    pub seed: u64,
    /// Wall time over the raw array
    pub no_cache_secs: f64,
    /// Wall time through the cache
    pub with_cache_secs: f64,
    /// `no_cache_secs / with_cache_secs`
    pub speedup: f64,
    /// Both paths produced identical range sums
    pub checksums_match: bool,
    pub cache: CacheStats,
}

// == Runner ==
/// Runs the workload from `config` with and without the cache.
pub fn run_benchmark(config: &Config) -> Result<BenchReport> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let array = generate_array(&mut rng, config.array_len);
    let ops = generate_operations(&mut rng, config)?;
    let updates = ops
        .iter()
        .filter(|op| matches!(op, Operation::Update { .. }))
        .count();
    info!(
        array_len = config.array_len,
        operations = ops.len(),
        updates,
        "Workload generated"
    );

    let mut raw = array.clone();
    let started = Instant::now();
    let mut raw_sums = Vec::with_capacity(ops.len() - updates);
    for op in &ops {
        match *op {
            Operation::Range { left, right } => raw_sums.push(range_sum(&raw, left, right)?),
            Operation::Update { index, value } => raw[index] = value,
        }
    }
    let no_cache_secs = started.elapsed().as_secs_f64();
    debug!(no_cache_secs, "Uncached pass finished");

    let mut cached = CachedRangeSum::new(array, config.cache_capacity)?;
    let started = Instant::now();
    let mut cached_sums = Vec::with_capacity(raw_sums.len());
    for op in &ops {
        match *op {
            Operation::Range { left, right } => cached_sums.push(cached.range_sum(left, right)?),
            Operation::Update { index, value } => cached.update(index, value)?,
        }
    }
    let with_cache_secs = started.elapsed().as_secs_f64();
    debug!(with_cache_secs, "Cached pass finished");

    let speedup = if with_cache_secs > 0.0 {
        no_cache_secs / with_cache_secs
    } else {
        f64::INFINITY
    };

    Ok(BenchReport {
        array_len: config.array_len,
        operations: ops.len(),
        updates,
        capacity: config.cache_capacity,
        seed: config.seed,
        no_cache_secs,
        with_cache_secs,
        speedup,
        checksums_match: raw_sums == cached_sums,
        cache: cached.cache().stats(),
    })
}
