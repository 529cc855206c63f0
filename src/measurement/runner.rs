//! The benchmark runner.
//!
//! `run(workload, iterations)` primes the workload once without recording it,
//! then times each of `iterations` invocations individually:
//! - start timestamp immediately before the call
//! - end timestamp immediately after it returns
//! - `end - start` appended to the result, in invocation order
//!
//! Nothing else happens between the two timestamps, so loop bookkeeping is
//! never charged to a sample.

use std::convert::Infallible;

use crate::config::{RunConfig, DEFAULT_WARMUP};

use super::samples::Samples;
use super::timer::{black_box, Timer};

/// Runs a workload repeatedly and records one duration per iteration.
///
/// The runner holds no state between runs; the same runner may be reused.
#[derive(Debug, Clone)]
pub struct Runner {
    /// The timer used for measurements.
    timer: Timer,
    /// Untimed invocations before measuring.
    warmup_iterations: usize,
}

impl Runner {
    /// Create a runner with a freshly calibrated timer and a single warm-up call.
    pub fn new() -> Self {
        Self::with_timer(Timer::new())
    }

    /// Create a runner with a pre-calibrated timer.
    pub fn with_timer(timer: Timer) -> Self {
        Self {
            timer,
            warmup_iterations: DEFAULT_WARMUP,
        }
    }

    /// Create a runner using the warm-up count from `config`.
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new().warmup(config.warmup)
    }

    /// Set the number of untimed warm-up invocations.
    ///
    /// # Panics
    ///
    /// Panics if `iterations` is zero.
    pub fn warmup(mut self, iterations: usize) -> Self {
        assert!(iterations > 0, "warmup must be > 0");
        self.warmup_iterations = iterations;
        self
    }

    /// Get a reference to the internal timer.
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Number of untimed invocations made before measuring.
    pub fn warmup_iterations(&self) -> usize {
        self.warmup_iterations
    }

    /// Time `iterations` invocations of a fallible workload.
    ///
    /// The first error, whether raised during warm-up or a measured iteration,
    /// is returned as-is and every sample collected so far is dropped.
    ///
    /// # Returns
    ///
    /// Exactly `iterations` durations in invocation order. With zero
    /// iterations the result is empty and only the warm-up call is made.
    pub fn run<F, T, E>(&self, mut workload: F, iterations: usize) -> Result<Samples, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let _run = tracing::debug_span!("run", iterations).entered();

        {
            let _warmup = tracing::trace_span!("warmup").entered();
            for _ in 0..self.warmup_iterations {
                black_box(workload()?);
            }
        }

        let mut durations = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            let (elapsed, out) = self.timer.measure(|| workload());
            black_box(out?);
            durations.push(elapsed);
        }

        let samples = Samples::from_durations(durations);
        tracing::debug!(
            iterations,
            total_ms = samples.total().as_secs_f64() * 1e3,
            "run complete"
        );
        Ok(samples)
    }

    /// Time `iterations` invocations of a workload that cannot fail.
    pub fn measure<F, T>(&self, mut workload: F, iterations: usize) -> Samples
    where
        F: FnMut() -> T,
    {
        match self.run(|| Ok::<T, Infallible>(workload()), iterations) {
            Ok(samples) => samples,
            Err(never) => match never {},
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}
