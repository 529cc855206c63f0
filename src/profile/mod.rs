//! Deterministic profiling of workloads.
//!
//! Workloads run with the [`Traced`](crate::workload::Traced) probe emit one
//! `tracing` span per frame. The [`Profiler`] layer times those spans and
//! aggregates them into a [`Report`] of call counts and own/cumulative time.

mod layer;
mod report;
mod sort;

pub use layer::Profiler;
pub use report::{FrameStats, Report};
pub use sort::SortKey;
