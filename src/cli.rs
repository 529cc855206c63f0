//! Command-line flags shared by every benchmark binary.

use std::io::Write;

use clap::Args;

use crate::config::{RunConfig, DEFAULT_ITERATIONS};
use crate::error::Error;
use crate::profile::SortKey;

/// Flags common to all benchmark scripts.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CommonArgs {
    /// Number of measured iterations
    #[arg(
        short = 'n',
        value_name = "INT",
        default_value_t = DEFAULT_ITERATIONS,
        value_parser = parse_iterations,
        allow_negative_numbers = true
    )]
    pub iterations: usize,

    /// Print profiler statistics instead of per-iteration timings
    #[arg(long)]
    pub profile: bool,

    /// Profile report ordering: time, cumulative, calls, name or file
    #[arg(long = "profile_sort", value_name = "KEY", default_value_t = SortKey::Time)]
    pub profile_sort: SortKey,
}

impl CommonArgs {
    /// The run configuration these flags describe.
    pub fn run_config(&self) -> RunConfig {
        if !self.profile && self.profile_sort != SortKey::default() {
            tracing::debug!(sort = %self.profile_sort, "--profile_sort ignored without --profile");
        }
        RunConfig::new()
            .iterations(self.iterations)
            .profile(self.profile)
            .profile_sort(self.profile_sort)
    }
}

fn parse_iterations(raw: &str) -> Result<usize, String> {
    let signed: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not an integer"))?;
    RunConfig::new()
        .signed_iterations(signed)
        .map(|config| config.iterations)
        .map_err(|err| match err {
            Error::Config(message) => message,
            other => other.to_string(),
        })
}

/// Print `err` and its chain of causes to `out`, one per line.
pub fn report_error<W: Write>(out: &mut W, err: &(dyn std::error::Error + 'static)) {
    let _ = writeln!(out, "error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(out, "  caused by: {cause}");
        source = cause.source();
    }
}
