//! Aggregated profiler output.

use std::cmp::Ordering;
use std::time::Duration;

use super::SortKey;

/// Statistics for one profiled frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStats {
    /// Span name with its recorded fields, e.g. `call{depth=2}`.
    pub label: String,
    /// `file:line` of the span's callsite.
    pub location: String,
    /// Number of closed spans.
    pub calls: u64,
    /// Time inside the frame excluding child frames.
    pub own: Duration,
    /// Time inside the frame including child frames.
    pub cumulative: Duration,
}

impl FrameStats {
    /// Own time per call, in seconds.
    pub fn own_per_call(&self) -> f64 {
        per_call(self.own, self.calls)
    }

    /// Cumulative time per call, in seconds.
    pub fn cumulative_per_call(&self) -> f64 {
        per_call(self.cumulative, self.calls)
    }
}

fn per_call(total: Duration, calls: u64) -> f64 {
    if calls == 0 {
        0.0
    } else {
        total.as_secs_f64() / calls as f64
    }
}

/// A sorted snapshot of a [`Profiler`](super::Profiler).
#[derive(Debug, Clone)]
pub struct Report {
    frames: Vec<FrameStats>,
    sort: SortKey,
}

impl Report {
    pub(crate) fn new(frames: Vec<FrameStats>, sort: SortKey) -> Self {
        Self { frames, sort }.sorted_by(sort)
    }

    /// Re-order by another key.
    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.frames.sort_by(|a, b| compare(a, b, sort));
        self.sort = sort;
        self
    }

    /// Frames in report order.
    pub fn frames(&self) -> &[FrameStats] {
        &self.frames
    }

    /// Key the frames are ordered by.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Calls across all frames.
    pub fn total_calls(&self) -> u64 {
        self.frames.iter().map(|f| f.calls).sum()
    }

    /// Sum of own time across all frames.
    pub fn total_time(&self) -> Duration {
        self.frames.iter().map(|f| f.own).sum()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Numeric keys sort descending, text keys ascending. Ties fall back to the
/// label so output is stable.
fn compare(a: &FrameStats, b: &FrameStats, sort: SortKey) -> Ordering {
    let primary = match sort {
        SortKey::Time => b.own.cmp(&a.own),
        SortKey::Cumulative => b.cumulative.cmp(&a.cumulative),
        SortKey::Calls => b.calls.cmp(&a.calls),
        SortKey::Name => a.label.cmp(&b.label),
        SortKey::File => a.location.cmp(&b.location),
    };
    primary
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.location.cmp(&b.location))
}
