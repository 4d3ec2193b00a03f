//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::time::Duration;

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while assembling or validating the deploy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No target host configured. Pass --host, set ZETA_DEPLOY_HOST, or set target.host in the config file.")]
    MissingHost,

    #[error("No password supplied. Set ZETA_DEPLOY_PASSWORD or pass --password-file <path>.")]
    MissingPassword,

    #[error("Password file {0} is empty.")]
    EmptyPasswordFile(String),

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

// ── Remote errors ─────────────────────────────────────────────────────────────

/// Transport-level failures talking to the remote host.
///
/// A command that runs and exits non-zero is NOT a `RemoteError`; it is a
/// normal [`crate::domain::command::CommandResult`].
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Timed out connecting to {host}:{port} after {}s", .timeout.as_secs())]
    ConnectTimeout {
        host: String,
        port: u16,
        timeout: Duration,
    },

    #[error("Authentication rejected for {user}@{host}")]
    AuthRejected { user: String, host: String },

    #[error("Command timed out after {}s: {command}", .timeout.as_secs())]
    CommandTimeout { command: String, timeout: Duration },

    #[error("Session is closed")]
    SessionClosed,
}

// ── Workflow errors ───────────────────────────────────────────────────────────

/// Terminal workflow outcomes that should make the process exit non-zero.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Build failed (exit code {exit_code}). The service was not restarted.")]
    BuildFailed { exit_code: i32 },
}
