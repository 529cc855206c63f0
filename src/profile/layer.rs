//! Deterministic span profiler.

use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use super::report::{FrameStats, Report};
use super::SortKey;

/// Frame identity: label plus source location.
type FrameKey = (String, String);

/// Per-span bookkeeping kept in the registry's span extensions.
struct SpanTiming {
    key: FrameKey,
    entered_at: Option<Instant>,
    busy: Duration,
    children: Duration,
}

#[derive(Default)]
struct Totals {
    calls: u64,
    own: Duration,
    cumulative: Duration,
}

/// A [`Layer`] that turns closed spans into per-frame call statistics.
///
/// Spans with the same name, recorded fields and callsite share a frame. A
/// frame's cumulative time is the time its spans were entered; own time
/// excludes time spent in child spans. Handles are cheap to clone and share
/// one table, so keep a clone to read the report after the subscriber is gone.
#[derive(Clone, Default)]
pub struct Profiler {
    table: Arc<Mutex<HashMap<FrameKey, Totals>>>,
}

impl fmt::Debug for Profiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frames = self
            .table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("Profiler").field("frames", &frames).finish()
    }
}

impl Profiler {
    /// Create an empty profiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the recorded frames, ordered by `sort`.
    pub fn report(&self, sort: SortKey) -> Report {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let frames = table
            .iter()
            .map(|((label, location), totals)| FrameStats {
                label: label.clone(),
                location: location.clone(),
                calls: totals.calls,
                own: totals.own,
                cumulative: totals.cumulative,
            })
            .collect();
        Report::new(frames, sort)
    }
}

impl<S> Layer<S> for Profiler
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let meta = attrs.metadata();
        let mut label = LabelVisitor::new(meta.name());
        attrs.record(&mut label);
        let location = match (meta.file(), meta.line()) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            (Some(file), None) => file.to_string(),
            _ => meta.target().to_string(),
        };
        span.extensions_mut().insert(SpanTiming {
            key: (label.finish(), location),
            entered_at: None,
            busy: Duration::ZERO,
            children: Duration::ZERO,
        });
    }

    fn on_enter(&self, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(timing) = span.extensions_mut().get_mut::<SpanTiming>() {
                timing.entered_at = Some(Instant::now());
            }
        }
    }

    fn on_exit(&self, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let elapsed = {
            let mut ext = span.extensions_mut();
            let Some(timing) = ext.get_mut::<SpanTiming>() else {
                return;
            };
            let Some(entered_at) = timing.entered_at.take() else {
                return;
            };
            let elapsed = entered_at.elapsed();
            timing.busy += elapsed;
            elapsed
        };
        if let Some(parent) = span.parent() {
            if let Some(timing) = parent.extensions_mut().get_mut::<SpanTiming>() {
                timing.children += elapsed;
            }
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(timing) = span.extensions_mut().remove::<SpanTiming>() else {
            return;
        };
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let totals = table.entry(timing.key).or_default();
        totals.calls += 1;
        totals.cumulative += timing.busy;
        totals.own += timing.busy.saturating_sub(timing.children);
    }
}

/// Renders a span as `name{field=value,...}`.
struct LabelVisitor {
    label: String,
    fields: usize,
}

impl LabelVisitor {
    fn new(name: &str) -> Self {
        Self {
            label: name.to_string(),
            fields: 0,
        }
    }

    fn separator(&mut self) {
        self.label.push(if self.fields == 0 { '{' } else { ',' });
        self.fields += 1;
    }

    fn finish(mut self) -> String {
        if self.fields > 0 {
            self.label.push('}');
        }
        self.label
    }
}

impl Visit for LabelVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.separator();
        let _ = write!(self.label, "{}={}", field.name(), value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.separator();
        let _ = write!(self.label, "{}={:?}", field.name(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    fn profiled<F: FnOnce()>(f: F) -> Profiler {
        let profiler = Profiler::new();
        let subscriber = Registry::default().with(profiler.clone());
        tracing::subscriber::with_default(subscriber, f);
        profiler
    }

    #[test]
    fn test_counts_calls_per_frame() {
        let profiler = profiled(|| {
            for depth in 0..2usize {
                for _ in 0..3 {
                    let _frame = tracing::trace_span!("call", depth).entered();
                }
            }
        });
        let report = profiler.report(SortKey::Name);
        let frames = report.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].label, "call{depth=0}");
        assert_eq!(frames[0].calls, 3);
        assert_eq!(frames[1].label, "call{depth=1}");
        assert_eq!(report.total_calls(), 6);
    }

    #[test]
    fn test_own_time_excludes_children() {
        let profiler = profiled(|| {
            let _outer = tracing::trace_span!("outer").entered();
            let _inner = tracing::trace_span!("inner").entered();
            thread::sleep(Duration::from_millis(20));
        });
        let report = profiler.report(SortKey::Cumulative);
        let outer = report.frames().iter().find(|f| f.label == "outer").unwrap();
        let inner = report.frames().iter().find(|f| f.label == "inner").unwrap();

        assert!(inner.own >= Duration::from_millis(20));
        assert!(outer.cumulative >= inner.cumulative);
        assert!(outer.own < inner.own);
    }

    #[test]
    fn test_string_fields_unquoted() {
        let profiler = profiled(|| {
            let _frame = tracing::trace_span!("render", template = "page.html").entered();
        });
        let report = profiler.report(SortKey::Time);
        assert_eq!(report.frames()[0].label, "render{template=page.html}");
        assert!(report.frames()[0].location.contains("layer.rs"));
    }
}
