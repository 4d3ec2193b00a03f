//! Per-command contract shared by every workflow.
//!
//! Echo the command, run it, show a truncated view of what came back, and hand
//! the untruncated result to the caller for any branching.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::application::ports::{ProgressReporter, RemoteShell};
use crate::domain::{CommandResult, DisplayLimits};

/// Runs remote commands one at a time and reports each to the operator.
pub struct StepRunner<'a, S, R> {
    shell: &'a S,
    reporter: &'a R,
    limits: DisplayLimits,
    default_timeout: Duration,
}

impl<'a, S: RemoteShell, R: ProgressReporter> StepRunner<'a, S, R> {
    #[must_use]
    pub fn new(
        shell: &'a S,
        reporter: &'a R,
        limits: DisplayLimits,
        default_timeout: Duration,
    ) -> Self {
        Self {
            shell,
            reporter,
            limits,
            default_timeout,
        }
    }

    /// Run `command` with the runner's default timeout.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and timeouts from the shell.
    pub async fn run(&self, command: &str) -> Result<CommandResult> {
        self.run_with_timeout(command, self.default_timeout).await
    }

    /// Run `command` with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and timeouts from the shell.
    pub async fn run_with_timeout(&self, command: &str, timeout: Duration) -> Result<CommandResult> {
        self.reporter.command(command);
        let started = Instant::now();
        let result = self
            .shell
            .exec(command, timeout)
            .await
            .with_context(|| format!("remote command failed: {}", first_line(command)))?;
        tracing::debug!(
            exit_code = result.exit_code,
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "remote command finished"
        );
        self.reporter.output(&result.view(self.limits));
        Ok(result)
    }
}

fn first_line(command: &str) -> &str {
    command.lines().next().unwrap_or(command)
}
