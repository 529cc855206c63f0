//! Workloads the harness can time.
//!
//! Any closure is a workload as far as the [`Runner`](crate::Runner) is
//! concerned. The [`Benchmark`] trait is for workloads that also support the
//! profiler: each sample is run against a [`Probe`], so the same code serves
//! direct timing ([`Untraced`]) and profiling ([`Traced`]).

mod call_graph;
mod probe;
mod render;

pub use call_graph::{CallGraph, DEFAULT_DEPTH, DEFAULT_FAN_OUT, DEFAULT_ROOTS, MAX_DEPTH};
pub use probe::{Probe, Traced, Untraced};
pub use render::{RenderWorkload, DEFAULT_RENDERS_PER_SAMPLE};

use crate::error::Result;

/// A workload that can be timed directly or under the profiler.
pub trait Benchmark {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Perform one sample's worth of work.
    fn sample<P: Probe>(&self, probe: &P) -> Result<()>;
}
