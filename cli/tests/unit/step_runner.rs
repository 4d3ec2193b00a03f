//! Tests for the per-command `StepRunner` contract.

#![allow(clippy::expect_used)]

use std::time::Duration;

use zeta_deploy::application::services::step::StepRunner;
use zeta_deploy::domain::{CommandResult, DisplayLimits};

use crate::helpers::{Event, FakeShell, RecordingReporter};

const LIMITS: DisplayLimits = DisplayLimits {
    stdout: 5,
    stderr: 3,
};

#[tokio::test]
async fn test_command_is_echoed_before_its_output() {
    let shell = FakeShell::new().respond("uname", CommandResult::new("Linux\n", "", 0));
    let reporter = RecordingReporter::new();
    let runner = StepRunner::new(&shell, &reporter, LIMITS, Duration::from_secs(5));

    runner.run("uname -a").await.expect("run");

    assert_eq!(
        reporter.events(),
        vec![
            Event::Command("uname -a".to_string()),
            Event::Output {
                stdout: "Linux".to_string(),
                stderr: String::new(),
                exit_code: 0,
            },
        ]
    );
}

#[tokio::test]
async fn test_result_is_untruncated_while_view_is_cut() {
    let shell = FakeShell::new().respond("build", CommandResult::new("0123456789", "abcdef", 2));
    let reporter = RecordingReporter::new();
    let runner = StepRunner::new(&shell, &reporter, LIMITS, Duration::from_secs(5));

    let result = runner.run("build").await.expect("run");

    assert_eq!(result.stdout, "0123456789");
    assert_eq!(result.stderr, "abcdef");
    assert_eq!(result.exit_code, 2);
    let (stdout, stderr, code) = reporter.output_for("build").expect("output");
    assert_eq!(stdout, "56789");
    assert_eq!(stderr, "def");
    assert_eq!(code, 2);
}

#[tokio::test]
async fn test_default_and_explicit_timeouts_reach_shell() {
    let shell = FakeShell::new();
    let reporter = RecordingReporter::new();
    let runner = StepRunner::new(&shell, &reporter, LIMITS, Duration::from_secs(7));

    runner.run("first").await.expect("run");
    runner
        .run_with_timeout("second", Duration::from_secs(42))
        .await
        .expect("run");

    assert_eq!(shell.timeout_for("first"), Some(Duration::from_secs(7)));
    assert_eq!(shell.timeout_for("second"), Some(Duration::from_secs(42)));
}

#[tokio::test]
async fn test_transport_error_names_command_and_skips_output() {
    let shell = FakeShell::new().fail_on("git pull");
    let reporter = RecordingReporter::new();
    let runner = StepRunner::new(&shell, &reporter, LIMITS, Duration::from_secs(5));

    let err = runner
        .run("cd /root/zeta4 && git pull")
        .await
        .expect_err("must fail");

    let msg = format!("{err:#}");
    assert!(msg.contains("git pull"), "got: {msg}");
    assert!(msg.contains("connection reset"), "got: {msg}");
    assert!(
        !reporter
            .events()
            .iter()
            .any(|e| matches!(e, Event::Output { .. })),
        "no output event for a failed transport"
    );
}

#[tokio::test]
async fn test_error_context_uses_first_line_only() {
    let shell = FakeShell::new().fail_on("cat >");
    let reporter = RecordingReporter::new();
    let runner = StepRunner::new(&shell, &reporter, LIMITS, Duration::from_secs(5));

    let err = runner
        .run("cat > /tmp/unit << 'EOF'\n[Unit]\nEOF")
        .await
        .expect_err("must fail");

    let top = err.to_string();
    assert!(top.contains("cat > /tmp/unit"), "got: {top}");
    assert!(!top.contains("[Unit]"), "got: {top}");
}
