//! Application service: full deploy use-case.
//!
//! Provisions build tooling, fetches the source, builds the node and installs
//! it as a systemd service. Imports only from `crate::domain` and
//! `crate::application::ports`.

use std::fmt;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{ProgressReporter, RemoteShell};
use crate::application::services::step::StepRunner;
use crate::domain::{DeployConfig, DisplayLimits, script, tail};

/// Timeout for commands without a more specific one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
pub const PACKAGES_TIMEOUT: Duration = Duration::from_secs(120);
pub const RUSTUP_TIMEOUT: Duration = Duration::from_secs(300);
pub const BUILD_TIMEOUT: Duration = Duration::from_secs(600);

/// Build output lines kept on the first attempt and on the diagnostic re-run.
const BUILD_TAIL_LINES: usize = 20;
const BUILD_DIAGNOSTIC_TAIL_LINES: usize = 50;
/// Characters of a failed build's stderr repeated in the error report.
const BUILD_STDERR_REPORT_CHARS: usize = 2000;

/// Pauses that give the remote host time to settle between steps.
#[derive(Debug, Clone, Copy)]
pub struct DeployOptions {
    /// After killing the old process.
    pub stop_settle: Duration,
    /// After restarting the service, before reading its status.
    pub restart_settle: Duration,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            stop_settle: Duration::from_secs(1),
            restart_settle: Duration::from_secs(2),
        }
    }
}

/// Publicly reachable endpoints of a deployed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub host: String,
    pub p2p_port: u16,
    pub ws_port: u16,
    pub web_domain: String,
}

impl Endpoints {
    #[must_use]
    pub fn from_config(config: &DeployConfig) -> Self {
        Self {
            host: config.target.host.clone().unwrap_or_default(),
            p2p_port: config.network.p2p_port,
            ws_port: config.network.ws_port,
            web_domain: config.network.web_domain.clone(),
        }
    }
}

impl fmt::Display for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{host}:{p2p} (P2P) / {host}:{ws} (WebSocket)",
            host = self.host,
            p2p = self.p2p_port,
            ws = self.ws_port
        )
    }
}

/// Outcome of the `deploy` use-case.
#[derive(Debug)]
pub enum DeployOutcome {
    /// The node was built and the service restarted.
    Deployed { endpoints: Endpoints },
    /// The build failed; nothing after the build was issued.
    BuildFailed { exit_code: i32 },
}

/// Run the deploy workflow over an open session.
///
/// Only the build result changes control flow beyond the two probes
/// (toolchain present, checkout present). Every other step is best-effort:
/// its exit code is shown and ignored.
///
/// # Errors
///
/// Returns an error if the session fails or a command exceeds its timeout.
pub async fn deploy(
    shell: &impl RemoteShell,
    reporter: &impl ProgressReporter,
    config: &DeployConfig,
    opts: &DeployOptions,
) -> Result<DeployOutcome> {
    let runner = StepRunner::new(shell, reporter, DisplayLimits::DEPLOY, DEFAULT_TIMEOUT);
    let project = &config.project;
    let service = &config.service;

    // Step 1: Host facts, for the operator only.
    reporter.step("checking system...");
    for probe in script::SYSTEM_PROBES {
        runner.run(probe).await?;
    }

    // Step 2: Build packages, best-effort.
    reporter.step("installing build packages...");
    runner
        .run_with_timeout(script::INSTALL_BUILD_PACKAGES, PACKAGES_TIMEOUT)
        .await?;

    // Step 3: Toolchain.
    if runner.run(script::PROBE_CARGO).await?.success() {
        reporter.success("Rust toolchain present");
    } else {
        reporter.step("installing Rust...");
        runner
            .run_with_timeout(script::INSTALL_RUSTUP, RUSTUP_TIMEOUT)
            .await?;
        runner.run(&script::rustc_version()).await?;
    }

    // Step 4: Clone or update.
    if runner.run(&script::probe_checkout(project)).await?.success() {
        reporter.step("updating source checkout...");
        runner.run(&script::pull(project)).await?;
    } else {
        reporter.step("cloning source...");
        runner.run(&script::clone(project)).await?;
    }

    // Step 5: Build.
    reporter.step("building node (this may take a few minutes)...");
    let build = runner
        .run_with_timeout(&script::build(project, Some(BUILD_TAIL_LINES)), BUILD_TIMEOUT)
        .await?;
    if !build.success() {
        reporter.error(&format!("build failed (exit {})", build.exit_code));
        let stderr = tail(build.stderr.trim(), BUILD_STDERR_REPORT_CHARS);
        if !stderr.is_empty() {
            reporter.error(stderr);
        }
        runner
            .run_with_timeout(
                &script::build(project, Some(BUILD_DIAGNOSTIC_TAIL_LINES)),
                BUILD_TIMEOUT,
            )
            .await?;
        return Ok(DeployOutcome::BuildFailed {
            exit_code: build.exit_code,
        });
    }
    reporter.success("build succeeded");

    // Step 6: Stop the running instance.
    runner.run(&script::stop_node(project)).await?;
    tokio::time::sleep(opts.stop_settle).await;

    // Step 7: Firewall, best-effort through both ufw and iptables.
    reporter.step("opening firewall ports...");
    runner.run(&script::open_ports(&config.network)).await?;

    // Step 8: Service unit.
    reporter.step(&format!("installing service '{}'...", service.name));
    runner.run(&script::write_service_unit(config)).await?;
    runner.run(&script::enable_and_restart(service)).await?;
    tokio::time::sleep(opts.restart_settle).await;
    runner.run(&script::status(service, 20)).await?;
    runner.run(&script::journal(service, 15)).await?;

    // Step 9: Housekeeping, visibility only.
    runner.run(&script::backup_web_asset(project)).await?;
    runner.run(script::WEB_SERVER_PROBE).await?;

    Ok(DeployOutcome::Deployed {
        endpoints: Endpoints::from_config(config),
    })
}
