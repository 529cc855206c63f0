//! Diagnostic logging.
//!
//! Logs go to stderr so stdout stays machine-readable. The level comes from
//! `RUST_LOG` and defaults to `warn`.

use tracing::Subscriber;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::{LookupSpan, Registry};
use tracing_subscriber::Layer;

/// Level used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter built from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVE`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// The stderr log layer, with its own filter.
///
/// The filter applies to this layer only, so other layers on the same
/// subscriber (the profiler) still see every span.
pub fn stderr_layer<S>() -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter())
}

/// Install the stderr layer as the global subscriber.
///
/// Does nothing if a global subscriber is already set.
pub fn init() {
    let subscriber = Registry::default().with(stderr_layer());
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
