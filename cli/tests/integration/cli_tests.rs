//! CLI structure, argument parsing, and pre-connection failures.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary with a private config path and no inherited target settings.
fn zeta(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("zeta-deploy"));
    cmd.env("NO_COLOR", "1")
        .env("ZETA_DEPLOY_CONFIG", dir.path().join("config.yaml"))
        .env_remove("ZETA_DEPLOY_HOST")
        .env_remove("ZETA_DEPLOY_USER")
        .env_remove("ZETA_DEPLOY_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn tmp() -> TempDir {
    TempDir::new().expect("temp dir")
}

// --- Help and version ---

#[test]
fn test_no_args_shows_help_and_exits_two() {
    let dir = tmp();
    zeta(&dir).assert().code(2).stderr(predicate::str::contains(
        "Deploy and rebuild a Zeta Network node over SSH",
    ));
}

#[test]
fn test_help_lists_commands() {
    let dir = tmp();
    zeta(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("rebuild"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    let dir = tmp();
    zeta(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zeta-deploy 0.1.0"));
}

#[test]
fn test_deploy_help_shows_target_flags() {
    let dir = tmp();
    zeta(&dir)
        .args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--password-file"));
}

#[test]
fn test_rebuild_help_shows_exit_code_only() {
    let dir = tmp();
    zeta(&dir)
        .args(["rebuild", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--exit-code-only"));
}

#[test]
fn test_unknown_command_fails() {
    let dir = tmp();
    zeta(&dir).arg("teleport").assert().failure();
}

// --- Failures before connecting ---

#[test]
fn test_deploy_without_host_fails() {
    let dir = tmp();
    zeta(&dir)
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No target host configured"));
}

#[test]
fn test_rebuild_without_password_fails() {
    let dir = tmp();
    zeta(&dir)
        .args(["rebuild", "--host", "203.0.113.7"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No password supplied"));
}

#[test]
fn test_host_from_env_is_used() {
    let dir = tmp();
    zeta(&dir)
        .env("ZETA_DEPLOY_HOST", "203.0.113.7")
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No password supplied"));
}

#[test]
fn test_empty_password_file_fails() {
    let dir = tmp();
    let pw = dir.path().join("pw");
    std::fs::write(&pw, "\n").expect("write");
    zeta(&dir)
        .args(["deploy", "--host", "203.0.113.7", "--password-file"])
        .arg(&pw)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is empty"));
}

#[test]
fn test_invalid_config_rejected_before_connecting() {
    let dir = tmp();
    std::fs::write(
        dir.path().join("config.yaml"),
        "target:\n  host: 203.0.113.7\nservice:\n  name: \"zeta; reboot\"\n",
    )
    .expect("write");
    zeta(&dir)
        .env("ZETA_DEPLOY_PASSWORD", "x")
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("service.name"));
}

// --- NO_COLOR handling ---

#[test]
fn test_no_color_env_accepts_any_value() {
    let dir = tmp();
    for value in ["1", "yes", ""] {
        zeta(&dir)
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("zeta-deploy 0.1.0"));
    }
}

#[test]
fn test_no_color_flag_is_accepted() {
    let dir = tmp();
    zeta(&dir)
        .args(["--no-color", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

// --- Connection failures ---

#[test]
fn test_connect_refused_is_fatal() {
    let dir = tmp();
    zeta(&dir)
        .env("ZETA_DEPLOY_PASSWORD", "x")
        .args(["deploy", "--host", "127.0.0.1", "--port", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot connect"))
        .stdout(predicate::str::contains(">>>").not());
}
