//! Template rendering benchmark.
//!
//! Replays a captured page render: the capture names a template and holds the
//! context it was rendered with. Host setup, template loading and compilation
//! all happen before timing starts.
//!
//! # Usage
//!
//! ```bash
//! # Bundled front page capture
//! cargo run --release --bin bm-template-render -- -n 50
//!
//! # Another capture, templates from elsewhere
//! cargo run --release --bin bm-template-render -- --data page.json --templates ./tmpl
//! ```

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use microbench::cli::{report_error, CommonArgs};
use microbench::data::Capture;
use microbench::host::HostEnv;
use microbench::workload::{RenderWorkload, DEFAULT_RENDERS_PER_SAMPLE};
use microbench::{harness, logging, output};

/// Time rendering a captured template
///
/// The workload is primed with the runner's single warm-up sample, which
/// already renders `--renders` times, rather than a separate pair of renders.
#[derive(Parser, Debug)]
#[command(name = "bm-template-render")]
#[command(about = "Time rendering a captured template against its context")]
#[command(version)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Capture file (default: the front page capture built into the binary)
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Template directory (default: `templates/` next to the capture file)
    #[arg(long, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Renders per sample
    #[arg(long, default_value_t = DEFAULT_RENDERS_PER_SAMPLE)]
    renders: usize,
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
    let capture = match &args.data {
        Some(path) => Capture::load(path)?,
        None => Capture::bundled()?,
    };
    let mut host = HostEnv::initialize(&capture.host)?;
    match (&args.templates, &args.data) {
        (Some(dir), _) => host.load_templates_from(dir),
        (None, Some(data)) => host.load_templates_from(Capture::template_dir_for(data)),
        (None, None) => host.add_bundled_templates()?,
    }

    let template = host.template(&capture.template)?;
    let context = host.prepare_context(capture.context);
    let workload = RenderWorkload::new(template, &context, args.renders)?;
    tracing::debug!(
        template = workload.template_name(),
        renders = workload.renders_per_sample(),
        "render workload ready"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    harness::execute(&workload, &args.common.run_config(), &mut out)
}
