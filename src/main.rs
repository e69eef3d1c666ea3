//! Range Gate - benchmark and rate limiter demo
//!
//! `range-gate bench` times range-sum queries with and without the LRU cache.
//! `range-gate demo` streams messages through the sliding-window limiter.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use range_gate::driver::{run_benchmark, run_demo, AdmissionRecord, BenchReport};
use range_gate::{spawn_sweep_task, Config, WindowLimiter};

/// Command line interface. Defaults come from the environment (see `Config`).
#[derive(Parser, Debug)]
#[command(name = "range-gate", about = "Range-sum LRU cache benchmark and rate limiter demo")]
struct Cli {
    /// Print reports as JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare range sums over a raw array and through the cache
    Bench {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        capacity: Option<usize>,
        #[arg(long)]
        array_len: Option<usize>,
        #[arg(long)]
        queries: Option<usize>,
    },
    /// Stream two series of messages through the rate limiter
    Demo {
        /// Messages per series
        #[arg(long)]
        messages: Option<usize>,
    },
}

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Apply command line overrides and validate
/// 4. Run the selected driver and print its report
#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "range_gate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("failed to load configuration")?;

    match cli.command {
        Command::Bench {
            seed,
            capacity,
            array_len,
            queries,
        } => {
            config.seed = seed.unwrap_or(config.seed);
            config.cache_capacity = capacity.unwrap_or(config.cache_capacity);
            config.array_len = array_len.unwrap_or(config.array_len);
            config.query_count = queries.unwrap_or(config.query_count);
            config.validate().context("invalid benchmark configuration")?;

            info!(
                "Running benchmark: array_len={}, queries={}, capacity={}, seed={}",
                config.array_len, config.query_count, config.cache_capacity, config.seed
            );
            let report = run_benchmark(&config).context("benchmark failed")?;
            print_bench(&report, cli.json)?;
        }
        Command::Demo { messages } => {
            config.demo_messages = messages.unwrap_or(config.demo_messages);
            config.validate().context("invalid demo configuration")?;
            demo(&config, cli.json).await?;
        }
    }

    Ok(())
}

async fn demo(config: &Config, json: bool) -> Result<()> {
    let limiter = Arc::new(RwLock::new(
        WindowLimiter::new(config.window_size, config.max_requests)
            .context("failed to build rate limiter")?,
    ));
    info!(
        "Rate limiter ready: window={:?}, max_requests={}",
        config.window_size, config.max_requests
    );

    let sweep_handle = spawn_sweep_task(limiter.clone(), config.sweep_interval);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let count = config.demo_messages;

    if !json {
        println!("\n=== Message stream ===");
    }
    let first = run_demo(&limiter, 1, count, config.demo_identities, 100..=1000, &mut rng).await;
    print_records(&first, json)?;

    if !json {
        println!("\nWaiting {} seconds...", config.demo_pause_secs);
    }
    tokio::time::sleep(Duration::from_secs(config.demo_pause_secs)).await;

    if !json {
        println!("\n=== New series after waiting ===");
    }
    let second = run_demo(
        &limiter,
        count + 1,
        count,
        config.demo_identities,
        100..=1000,
        &mut rng,
    )
    .await;
    print_records(&second, json)?;

    let stats = limiter.read().await.stats();
    info!(
        "Demo finished: admitted={}, rejected={}, tracked_identities={}",
        stats.admitted, stats.rejected, stats.tracked_identities
    );

    sweep_handle.abort();
    warn!("Sweep task aborted");
    Ok(())
}

fn print_bench(report: &BenchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("No cache : {:6.2} s", report.no_cache_secs);
    println!(
        "LRU cache: {:6.2} s  (speedup x{:.1})",
        report.with_cache_secs, report.speedup
    );
    println!(
        "Cache    : hits={} misses={} evictions={} invalidations={} hit_rate={:.2}",
        report.cache.hits,
        report.cache.misses,
        report.cache.evictions,
        report.cache.invalidations,
        report.cache.hit_rate()
    );
    if !report.checksums_match {
        warn!("Cached and uncached range sums differ");
    }
    Ok(())
}

fn print_records(records: &[AdmissionRecord], json: bool) -> Result<()> {
    for record in records {
        if json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            println!("{}", record.render());
        }
    }
    Ok(())
}
