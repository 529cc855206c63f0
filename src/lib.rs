//! # microbench
//!
//! A minimal harness for interpreter-style microbenchmarks.
//!
//! The core contract is [`Runner::run`]: invoke a workload once untimed to
//! prime caches, then time each of `iterations` invocations and return the
//! durations in order. Two workloads ship with the crate:
//! - [`workload::CallGraph`]: a fixed tree of nested calls, measuring call overhead
//! - [`workload::RenderWorkload`]: a template rendered against a captured context
//!
//! Each has a binary (`bm-call-simple`, `bm-template-render`) that prints one
//! duration in seconds per line, or profiler statistics with `--profile`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use microbench::Runner;
//!
//! let samples = Runner::new().measure(|| (0..1000u64).sum::<u64>(), 100);
//! for secs in samples.seconds() {
//!     println!("{secs}");
//! }
//! ```
//!
//! Fallible workloads use [`Runner::run`]; the first error is returned and
//! no samples are kept.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;

// Functional modules
pub mod cli;
pub mod data;
pub mod filters;
pub mod harness;
pub mod host;
pub mod logging;
pub mod measurement;
pub mod output;
pub mod profile;
pub mod workload;

// Re-exports for public API
pub use config::{RunConfig, DEFAULT_ITERATIONS, DEFAULT_WARMUP};
pub use error::{Error, Result};
pub use measurement::{black_box, Runner, Samples, Timer};
pub use profile::{Profiler, SortKey};
pub use workload::Benchmark;
