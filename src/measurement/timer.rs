//! Monotonic wall-clock timer.
//!
//! All samples are taken with `std::time::Instant`, the best monotonic clock
//! the host exposes. Because the clock never goes backwards, every measured
//! duration is non-negative.

use std::time::{Duration, Instant};

/// Number of back-to-back clock reads used to estimate resolution.
const RESOLUTION_PROBES: usize = 1000;

/// Upper bound on spins while waiting for the clock to tick once.
const MAX_SPINS_PER_PROBE: usize = 100_000;

/// Fallback used when the clock never advanced during probing.
const FALLBACK_RESOLUTION: Duration = Duration::from_micros(1);

/// Prevent the compiler from optimizing away a value.
#[inline]
pub fn black_box<T>(x: T) -> T {
    std::hint::black_box(x)
}

/// Timer state for measurement.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    resolution: Duration,
}

impl Timer {
    /// Create a timer, probing the clock once to estimate its resolution.
    pub fn new() -> Self {
        let resolution = estimate_resolution();
        tracing::debug!(resolution_ns = resolution.as_nanos() as u64, "timer calibrated");
        Self { resolution }
    }

    /// Create a timer with a known resolution, skipping calibration.
    pub fn with_resolution(resolution: Duration) -> Self {
        Self { resolution }
    }

    /// Smallest observed non-zero clock increment.
    pub fn resolution(&self) -> Duration {
        self.resolution
    }

    /// Timer name for diagnostics.
    pub fn name(&self) -> &'static str {
        "Instant"
    }

    /// Take a timestamp.
    #[inline(always)]
    pub fn now(&self) -> Instant {
        Instant::now()
    }

    /// Time a single call of `f`.
    ///
    /// The start timestamp is taken immediately before the call and the end
    /// timestamp immediately after it returns, before the result is inspected.
    #[inline]
    pub fn measure<F, T>(&self, f: F) -> (Duration, T)
    where
        F: FnOnce() -> T,
    {
        let start = self.now();
        let out = black_box(f());
        let elapsed = start.elapsed();
        (elapsed, out)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Empirically measure clock resolution as the minimum non-zero tick.
fn estimate_resolution() -> Duration {
    let mut min_diff: Option<Duration> = None;

    for _ in 0..RESOLUTION_PROBES {
        let t1 = Instant::now();
        let mut spins = 0;
        let diff = loop {
            let d = Instant::now().duration_since(t1);
            if !d.is_zero() || spins >= MAX_SPINS_PER_PROBE {
                break d;
            }
            spins += 1;
        };
        if !diff.is_zero() && min_diff.map_or(true, |m| diff < m) {
            min_diff = Some(diff);
        }
    }

    match min_diff {
        Some(d) => {
            if d > Duration::from_micros(1) {
                tracing::warn!(
                    resolution_ns = d.as_nanos() as u64,
                    "coarse clock, short workloads will quantize"
                );
            }
            d
        }
        None => {
            tracing::warn!("clock did not advance during calibration, assuming 1us resolution");
            FALLBACK_RESOLUTION
        }
    }
}
