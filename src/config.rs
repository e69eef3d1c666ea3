//! Configuration Module
//!
//! Handles loading and validating benchmark, limiter and demo parameters
//! from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of range sums the cache can hold
    pub cache_capacity: usize,
    /// Length of the benchmark array
    pub array_len: usize,
    /// Number of operations in the benchmark workload
    pub query_count: usize,
    /// Number of distinct hot ranges
    pub hot_pool: usize,
    /// Probability that a range query targets a hot range
    pub p_hot: f64,
    /// Probability that an operation is a point update
    pub p_update: f64,
    /// Seed for the workload generator
    pub seed: u64,
    /// Trailing window for the rate limiter
    pub window_size: Duration,
    /// Events admitted per identity per window
    pub max_requests: usize,
    /// Identity sweep interval in seconds
    pub sweep_interval: u64,
    /// Messages per demo series
    pub demo_messages: usize,
    /// Distinct identities in the demo stream
    pub demo_identities: usize,
    /// Pause between the two demo series in seconds
    pub demo_pause_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Cached range sums (default: 1000)
    /// - `ARRAY_LEN` - Benchmark array length (default: 100000)
    /// - `QUERY_COUNT` - Benchmark operations (default: 50000)
    /// - `HOT_POOL` - Hot range pool size (default: 30)
    /// - `P_HOT` - Hot range probability (default: 0.95)
    /// - `P_UPDATE` - Update probability (default: 0.03)
    /// - `SEED` - Workload seed (default: 42)
    /// - `WINDOW_SIZE_SECS` - Limiter window, fractional seconds allowed (default: 10)
    /// - `MAX_REQUESTS` - Limiter events per window (default: 1)
    /// - `SWEEP_INTERVAL` - Identity sweep frequency in seconds (default: 1)
    /// - `DEMO_MESSAGES` - Messages per demo series (default: 10)
    /// - `DEMO_IDENTITIES` - Demo identities (default: 5)
    /// - `DEMO_PAUSE_SECS` - Pause between demo series (default: 4)
    ///
    /// Unset variables take their default. A variable that is set but does
    /// not parse is an error, as is a parsed configuration that fails
    /// [`Config::validate`].
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let window_secs: f64 = env_or("WINDOW_SIZE_SECS", defaults.window_size.as_secs_f64())?;
        let window_size = Duration::try_from_secs_f64(window_secs)
            .map_err(|e| Error::Config(format!("WINDOW_SIZE_SECS: {}", e)))?;

        let config = Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity)?,
            array_len: env_or("ARRAY_LEN", defaults.array_len)?,
            query_count: env_or("QUERY_COUNT", defaults.query_count)?,
            hot_pool: env_or("HOT_POOL", defaults.hot_pool)?,
            p_hot: env_or("P_HOT", defaults.p_hot)?,
            p_update: env_or("P_UPDATE", defaults.p_update)?,
            seed: env_or("SEED", defaults.seed)?,
            window_size,
            max_requests: env_or("MAX_REQUESTS", defaults.max_requests)?,
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval)?,
            demo_messages: env_or("DEMO_MESSAGES", defaults.demo_messages)?,
            demo_identities: env_or("DEMO_IDENTITIES", defaults.demo_identities)?,
            demo_pause_secs: env_or("DEMO_PAUSE_SECS", defaults.demo_pause_secs)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the cache, limiter or drivers cannot run with.
    ///
    /// Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        if self.window_size.is_zero() {
            return Err(Error::InvalidWindowSize);
        }
        if self.max_requests == 0 {
            return Err(Error::InvalidMaxRequests);
        }
        if self.array_len == 0 {
            return Err(Error::Config("ARRAY_LEN must be positive".to_string()));
        }
        if self.demo_identities == 0 {
            return Err(Error::Config("DEMO_IDENTITIES must be positive".to_string()));
        }
        if self.sweep_interval == 0 {
            return Err(Error::Config("SWEEP_INTERVAL must be positive".to_string()));
        }
        for (name, p) in [("P_HOT", self.p_hot), ("P_UPDATE", self.p_update)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            array_len: 100_000,
            query_count: 50_000,
            hot_pool: 30,
            p_hot: 0.95,
            p_update: 0.03,
            seed: 42,
            window_size: Duration::from_secs(10),
            max_requests: 1,
            sweep_interval: 1,
            demo_messages: 10,
            demo_identities: 5,
            demo_pause_secs: 4,
        }
    }
}

/// Reads `name`, falling back to `default` when unset.
fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{}={:?}: {}", name, raw, e))),
        Err(_) => Ok(default),
    }
}
