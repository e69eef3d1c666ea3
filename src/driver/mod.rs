//! Driver Module
//!
//! Benchmark and demonstration drivers that exercise the cache and the
//! limiter through their public operations only.

pub mod bench;
pub mod demo;

pub use bench::{run_benchmark, BenchReport, Operation};
pub use demo::{run_demo, AdmissionRecord};
