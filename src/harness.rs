//! Running a benchmark in direct or profiled mode.
//!
//! Direct mode times the workload with the [`Untraced`] probe and writes one
//! sample per line. Profiled mode runs the same number of invocations with the
//! [`Traced`] probe under a scoped subscriber carrying a [`Profiler`], and
//! writes the profiler's report instead of samples.

use std::io::Write;

use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::logging;
use crate::measurement::{Runner, Samples};
use crate::output::{format_report, write_samples};
use crate::profile::{Profiler, Report, SortKey};
use crate::workload::{Benchmark, Traced, Untraced};

/// Time `iterations` samples of `bench` without instrumentation.
pub fn measure<B: Benchmark>(bench: &B, runner: &Runner, iterations: usize) -> Result<Samples> {
    runner.run(|| bench.sample(&Untraced), iterations)
}

/// Run `bench` under the profiler and return its report ordered by `sort`.
///
/// The profiler is installed for the current thread only and removed on
/// return, so nothing it records outlives the call.
pub fn profile<B: Benchmark>(
    bench: &B,
    runner: &Runner,
    iterations: usize,
    sort: SortKey,
) -> Result<Report> {
    let profiler = Profiler::new();
    let subscriber = Registry::default()
        .with(logging::stderr_layer())
        .with(profiler.clone());
    tracing::subscriber::with_default(subscriber, || {
        runner.run(|| bench.sample(&Traced), iterations)
    })?;
    Ok(profiler.report(sort))
}

/// Run `bench` as `config` describes and write the result to `out`.
pub fn execute<B, W>(bench: &B, config: &RunConfig, out: &mut W) -> Result<()>
where
    B: Benchmark,
    W: Write,
{
    config.validate()?;
    let runner = Runner::from_config(config);
    tracing::info!(
        benchmark = bench.name(),
        iterations = config.iterations,
        profile = config.profile,
        timer = runner.timer().name(),
        "starting"
    );

    if config.profile {
        let report = profile(bench, &runner, config.iterations, config.profile_sort)?;
        out.write_all(format_report(&report).as_bytes())
            .and_then(|()| out.flush())
            .map_err(Error::Output)
    } else {
        let samples = measure(bench, &runner, config.iterations)?;
        write_samples(out, &samples)
    }
}
