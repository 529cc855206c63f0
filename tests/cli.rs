//! Command-line behavior of the benchmark binaries.

use std::process::{Command, Output};

fn call_simple(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bm-call-simple"))
        .args(args)
        .output()
        .unwrap()
}

fn template_render(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bm-template-render"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<f64> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| line.parse::<f64>().unwrap())
        .collect()
}

// =============================================================================
// bm-call-simple
// =============================================================================

#[test]
fn call_simple_prints_one_float_per_iteration() {
    let output = call_simple(&["-n", "10", "--depth", "2", "--fan-out", "3", "--roots", "2"]);
    assert!(output.status.success());
    let samples = stdout_lines(&output);
    assert_eq!(samples.len(), 10);
    assert!(samples.iter().all(|s| *s >= 0.0));
}

#[test]
fn call_simple_zero_iterations_prints_nothing() {
    let output = call_simple(&["-n", "0", "--depth", "1"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn negative_iterations_fail() {
    let output = call_simple(&["-n", "-1"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn non_numeric_iterations_fail() {
    let output = call_simple(&["-n", "ten"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn invalid_shape_fails() {
    let output = call_simple(&["-n", "1", "--fan-out", "0"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fan-out must be > 0"));
}

#[test]
fn profile_prints_report() {
    let output = call_simple(&[
        "-n", "2", "--depth", "2", "--fan-out", "2", "--roots", "1", "--profile",
        "--profile_sort", "calls",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ordered by: call count"));
    assert!(stdout.contains("ncalls"));
    assert!(stdout.contains("call{depth=2}"));
    assert!(!stdout.contains("\u{1b}["), "piped output must be uncolored");
}

#[test]
fn unknown_sort_key_fails() {
    let output = call_simple(&["--profile", "--profile_sort", "bogus"]);
    assert_eq!(output.status.code(), Some(2));
}

// =============================================================================
// bm-template-render
// =============================================================================

#[test]
fn template_render_uses_bundled_capture() {
    let output = template_render(&["-n", "3", "--renders", "1"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_lines(&output).len(), 3);
}

#[test]
fn missing_capture_fails_with_chain() {
    let output = template_render(&["-n", "1", "--data", "/nonexistent/capture.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read /nonexistent/capture.json"));
    assert!(stderr.contains("caused by:"));
}

#[test]
fn template_render_reads_capture_and_sibling_templates() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("templates")).unwrap();
    std::fs::write(
        dir.path().join("templates").join("hello.html"),
        "{% for n in names %}{{ n|capfirst }}{% endfor %}",
    )
    .unwrap();
    let capture = dir.path().join("hello.json");
    std::fs::write(
        &capture,
        r#"{"template": "hello.html", "context": {"names": ["ada", "bob"]}}"#,
    )
    .unwrap();

    let output = template_render(&["-n", "2", "--renders", "1", "--data", capture.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_lines(&output).len(), 2);
}
