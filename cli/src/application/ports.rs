//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{CommandResult, DeployConfig, OutputView};

// ── Remote Shell Port ─────────────────────────────────────────────────────────

/// One live command-execution session to a remote host.
///
/// Commands run strictly one at a time: each call completes (or fails)
/// before the caller issues the next.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Run a shell command and capture stdout, stderr and exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the command does not finish
    /// within `timeout`. A non-zero exit code is not an error.
    async fn exec(&self, command: &str, timeout: Duration) -> Result<CommandResult>;

    /// Close the session.
    async fn close(&self) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit an error message. Never suppressed.
    fn error(&self, message: &str);
    /// Echo a remote command before it runs.
    fn command(&self, command: &str);
    /// Show the truncated result of the last command.
    fn output(&self, view: &OutputView<'_>);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts where the deploy configuration is read from.
pub trait ConfigStore {
    /// Load the configuration, returning defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    fn load(&self) -> Result<DeployConfig>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
