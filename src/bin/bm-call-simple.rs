//! Function-call overhead benchmark.
//!
//! # Usage
//!
//! ```bash
//! # 100 samples of the default call graph, one per line in seconds
//! cargo run --release --bin bm-call-simple
//!
//! # Smaller graph, profiled, report ordered by call count
//! cargo run --release --bin bm-call-simple -- -n 5 --depth 2 --profile --profile_sort calls
//! ```

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;

use microbench::cli::{report_error, CommonArgs};
use microbench::workload::{CallGraph, DEFAULT_DEPTH, DEFAULT_FAN_OUT, DEFAULT_ROOTS};
use microbench::{harness, logging, output};

/// Time a fixed tree of nested calls of decreasing arity
#[derive(Parser, Debug)]
#[command(name = "bm-call-simple")]
#[command(about = "Time a fixed tree of nested calls of decreasing arity")]
#[command(version)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Non-leaf levels in the call graph
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Calls from each level into the next
    #[arg(long, default_value_t = DEFAULT_FAN_OUT)]
    fan_out: usize,

    /// Calls into the top level per sample
    #[arg(long, default_value_t = DEFAULT_ROOTS)]
    roots: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init();
    output::init_color();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&mut io::stderr(), &err);
            if err.is_config() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(args: &Args) -> microbench::Result<()> {
    let graph = CallGraph::new(args.depth, args.fan_out, args.roots)?;
    tracing::debug!(
        depth = graph.depth(),
        fan_out = graph.fan_out(),
        roots = graph.roots(),
        calls_per_sample = graph.total_calls(),
        "call graph ready"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    harness::execute(&graph, &args.common.run_config(), &mut out)
}
