//! Run configuration.

use crate::error::{Error, Result};
use crate::profile::SortKey;

/// Default number of measured iterations.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Default number of untimed warm-up invocations.
pub const DEFAULT_WARMUP: usize = 1;

/// Configuration for a single benchmark run.
///
/// Lives for the duration of the process and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of measured iterations. Each produces exactly one sample.
    ///
    /// Default: 100.
    pub iterations: usize,

    /// Untimed invocations before the measured loop.
    ///
    /// Default: 1.
    pub warmup: usize,

    /// Route the run through the span profiler and report aggregated
    /// statistics instead of per-iteration samples.
    ///
    /// Default: false.
    pub profile: bool,

    /// Column the profile report is ordered by. Ignored unless `profile` is set.
    ///
    /// Default: [`SortKey::Time`].
    pub profile_sort: SortKey,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            warmup: DEFAULT_WARMUP,
            profile: false,
            profile_sort: SortKey::Time,
        }
    }
}

impl RunConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of measured iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the iteration count from a signed value, as supplied on a command line.
    ///
    /// Negative counts are a configuration error.
    pub fn signed_iterations(mut self, iterations: i64) -> Result<Self> {
        self.iterations = usize::try_from(iterations).map_err(|_| {
            Error::Config(format!(
                "iteration count must be non-negative, got {iterations}"
            ))
        })?;
        Ok(self)
    }

    /// Set the number of warm-up invocations.
    ///
    /// # Panics
    ///
    /// Panics if `warmup` is zero; the runner always primes the workload.
    pub fn warmup(mut self, warmup: usize) -> Self {
        assert!(warmup > 0, "warmup must be > 0");
        self.warmup = warmup;
        self
    }

    /// Enable or disable profiling.
    pub fn profile(mut self, enabled: bool) -> Self {
        self.profile = enabled;
        self
    }

    /// Set the profile report ordering.
    pub fn profile_sort(mut self, key: SortKey) -> Self {
        self.profile_sort = key;
        self
    }

    /// Check a configuration assembled field by field.
    pub fn validate(&self) -> Result<()> {
        if self.warmup == 0 {
            return Err(Error::Config("warmup must be > 0".into()));
        }
        Ok(())
    }
}
