//! Terminal formatting for profile reports.

use colored::Colorize;

use crate::profile::Report;

/// Format a profile report as a call-statistics table.
///
/// Columns are call count, own time, own time per call, cumulative time and
/// cumulative time per call, followed by `location(frame)`. Colors follow
/// `colored`'s terminal detection.
pub fn format_report(report: &Report) -> String {
    let mut output = String::new();

    let summary = format!(
        "{} frame calls in {:.3} seconds",
        report.total_calls(),
        report.total_time().as_secs_f64()
    );
    output.push('\n');
    output.push_str(&format!("{:>9}{}\n\n", "", summary.bold()));
    output.push_str(&format!(
        "   Ordered by: {}\n\n",
        report.sort().description()
    ));

    if report.is_empty() {
        output.push_str(&format!("   {}\n\n", "no frames recorded".yellow()));
        return output;
    }

    let header = format!(
        "{:>9} {:>8} {:>8} {:>8} {:>8} location(frame)",
        "ncalls", "tottime", "percall", "cumtime", "percall"
    );
    output.push_str(&header.bold().to_string());
    output.push('\n');

    for frame in report.frames() {
        output.push_str(&format!(
            "{:>9} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {}({})\n",
            frame.calls,
            frame.own.as_secs_f64(),
            frame.own_per_call(),
            frame.cumulative.as_secs_f64(),
            frame.cumulative_per_call(),
            frame.location.dimmed(),
            frame.label,
        ));
    }
    output.push('\n');
    output
}
