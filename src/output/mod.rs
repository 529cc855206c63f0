//! Output formatting for measurement results.
//!
//! - Samples: one duration in seconds per line, in invocation order
//! - Profile: a call-statistics table with a colored header on terminals

mod terminal;

pub use terminal::format_report;

use std::io::{IsTerminal, Write};

use crate::error::{Error, Result};
use crate::measurement::Samples;

/// Turn colored output off unless stdout is a terminal.
pub fn init_color() {
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
}

/// Write each sample as seconds on its own line.
///
/// Uses `{}` formatting so every value reads back as the same `f64`.
pub fn write_samples<W: Write>(out: &mut W, samples: &Samples) -> Result<()> {
    for secs in samples.seconds() {
        writeln!(out, "{secs}").map_err(Error::Output)?;
    }
    out.flush().map_err(Error::Output)
}
