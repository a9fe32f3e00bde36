//! Integration tests for the cpumask-convert tool.
//!
//! These run the built binary to verify exit codes and what ends up on stdout and stderr.

#![cfg(not(miri))]

use std::process::{Command, Output};

/// Helper to run cpumask-convert with the given arguments.
fn run_tool(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cpumask-convert"))
        .args(args)
        .output()
        .expect("failed to start cpumask-convert")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn mask_is_converted_to_list() {
    let output = run_tool(&["ff"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "0,1,2,3,4,5,6,7\n");
}

#[test]
fn list_is_converted_to_mask() {
    let output = run_tool(&["0-3,8"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "10f\n");
}

#[test]
fn chunked_mask_is_summed() {
    let output = run_tool(&["01,01"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "1\n");
}

#[test]
fn zero_mask_prints_empty_list() {
    let output = run_tool(&["0x0"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "\n");
}

#[test]
fn ambiguous_input_warns_on_stderr() {
    let output = run_tool(&["3"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "0,1\n");
    assert!(stderr_of(&output).contains("--mode"));
}

#[test]
fn piped_log_output_has_no_color_codes() {
    let output = run_tool(&["3"]);

    let stderr = stderr_of(&output);
    assert!(stderr.contains("WARN"));
    assert!(!stderr.contains('\u{1b}'));
}

#[test]
fn verbose_switch_logs_details_to_stderr() {
    let output = run_tool(&["-v", "0-3"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "0f\n");
    assert!(stderr_of(&output).contains("DEBUG"));
}

#[test]
fn quiet_by_default_for_unambiguous_input() {
    let output = run_tool(&["0-3"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr_of(&output).is_empty());
}

#[test]
fn mode_option_forces_direction() {
    let output = run_tool(&["--mode", "list", "3"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "08\n");
    assert!(stderr_of(&output).is_empty());
}

#[test]
fn compact_switch_prints_ranges() {
    let output = run_tool(&["--compact", "0xff0f"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "0-3,8-15\n");
}

#[test]
fn malformed_input_names_offending_token() {
    let output = run_tool(&["3-1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
    assert!(stderr_of(&output).contains("3-1"));
}

#[test]
fn unrecognized_input_reports_both_directions() {
    let output = run_tool(&["zz"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());

    let stderr = stderr_of(&output);
    assert!(stderr.contains("CPU mask"));
    assert!(stderr.contains("CPU list"));
}

#[test]
fn missing_argument_is_usage_error() {
    let output = run_tool(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_of(&output).is_empty());
    assert!(stderr_of(&output).contains("Usage:"));
}

#[test]
fn extra_argument_is_usage_error() {
    let output = run_tool(&["ff", "0-3"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_of(&output).is_empty());
    assert!(stderr_of(&output).contains("Usage:"));
}

#[test]
fn invalid_mode_is_usage_error() {
    let output = run_tool(&["--mode", "hex", "ff"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_of(&output).is_empty());

    let stderr = stderr_of(&output);
    assert!(stderr.contains("Invalid mode"));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn help_goes_to_stdout() {
    let output = run_tool(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("Usage:"));
}
