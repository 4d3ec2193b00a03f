//! Application service: rebuild use-case.
//!
//! Pulls, rebuilds and restarts an already-deployed node. The service is
//! restarted only when the build is judged successful.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{ProgressReporter, RemoteShell};
use crate::application::services::step::StepRunner;
use crate::domain::{BuildVerdict, DeployConfig, DisplayLimits, FailureDetection, classify, script};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

const BUILD_DIAGNOSTIC_TAIL_LINES: usize = 80;

#[derive(Debug, Clone, Copy)]
pub struct RebuildOptions {
    pub detection: FailureDetection,
    /// After restarting the service, before reading its status.
    pub restart_settle: Duration,
}

impl Default for RebuildOptions {
    fn default() -> Self {
        Self {
            detection: FailureDetection::default(),
            restart_settle: Duration::from_secs(3),
        }
    }
}

/// Outcome of the `rebuild` use-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Restarted,
    BuildFailed { exit_code: i32 },
}

/// Run the rebuild workflow over an open session.
///
/// # Errors
///
/// Returns an error if the session fails or a command exceeds its timeout.
pub async fn rebuild(
    shell: &impl RemoteShell,
    reporter: &impl ProgressReporter,
    config: &DeployConfig,
    opts: &RebuildOptions,
) -> Result<RebuildOutcome> {
    let runner = StepRunner::new(shell, reporter, DisplayLimits::REBUILD, DEFAULT_TIMEOUT);
    let project = &config.project;
    let service = &config.service;

    runner.run(&script::toolchain_versions()).await?;

    reporter.step("pulling latest source...");
    runner.run(&script::pull(project)).await?;

    reporter.step("building (may take a few minutes)...");
    let build = runner.run(&script::build(project, None)).await?;

    if let BuildVerdict::Failed { exit_code } = classify(&build, opts.detection) {
        reporter.error(&format!(
            "build failed, showing last {BUILD_DIAGNOSTIC_TAIL_LINES} lines"
        ));
        runner
            .run(&script::build(project, Some(BUILD_DIAGNOSTIC_TAIL_LINES)))
            .await?;
        return Ok(RebuildOutcome::BuildFailed { exit_code });
    }
    reporter.success("build succeeded");

    reporter.step(&format!("restarting service '{}'...", service.name));
    runner.run(&script::restart(service)).await?;
    tokio::time::sleep(opts.restart_settle).await;
    runner.run(&script::status(service, 15)).await?;
    runner.run(&script::journal(service, 20)).await?;
    runner.run(&script::listening_ports(&config.network)).await?;

    Ok(RebuildOutcome::Restarted)
}
