//! Profiler hooks for workloads.
//!
//! Workloads are generic over a [`Probe`] and open a frame at each point the
//! profiler should see. [`Untraced`] frames are `()`, so the direct timing path
//! carries no instrumentation at all once monomorphized. [`Traced`] frames are
//! entered `tracing` spans that the [`Profiler`](crate::profile::Profiler)
//! layer aggregates.

use tracing::span::EnteredSpan;

/// Opens profiler frames around units of work.
pub trait Probe {
    /// Held for the duration of the frame; dropping it closes the frame.
    type Frame;

    /// Frame for one call at `depth` of a synthetic call graph.
    fn call(&self, depth: usize) -> Self::Frame;

    /// Frame for one render of `template`.
    fn render(&self, template: &str) -> Self::Frame;
}

/// No instrumentation. Used for direct timing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untraced;

impl Probe for Untraced {
    type Frame = ();

    #[inline(always)]
    fn call(&self, _depth: usize) {}

    #[inline(always)]
    fn render(&self, _template: &str) {}
}

/// Each frame is a `trace`-level span.
#[derive(Debug, Clone, Copy, Default)]
pub struct Traced;

impl Probe for Traced {
    type Frame = EnteredSpan;

    #[inline]
    fn call(&self, depth: usize) -> EnteredSpan {
        tracing::trace_span!("call", depth).entered()
    }

    #[inline]
    fn render(&self, template: &str) -> EnteredSpan {
        tracing::trace_span!("render", template).entered()
    }
}
