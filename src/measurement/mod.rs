//! Measurement infrastructure.
//!
//! This module provides:
//! - A monotonic timer with a calibrated resolution estimate
//! - The runner that times one workload invocation per sample
//! - The ordered sample sequence a run produces

mod runner;
mod samples;
mod timer;

pub use runner::Runner;
pub use samples::Samples;
pub use timer::{black_box, Timer};
