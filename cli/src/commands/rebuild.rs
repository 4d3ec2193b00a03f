//! `zeta-deploy rebuild`: pull, rebuild and restart a deployed node.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::rebuild::{self as service, RebuildOptions, RebuildOutcome};
use crate::commands::{TargetArgs, connect, disconnect};
use crate::domain::{DeployError, FailureDetection};

/// Arguments for the rebuild command.
#[derive(Args, Default)]
pub struct RebuildArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Judge the build by exit code only, ignoring "error" in its output
    #[arg(long)]
    pub exit_code_only: bool,
}

impl RebuildArgs {
    fn detection(&self, configured: FailureDetection) -> FailureDetection {
        if self.exit_code_only {
            FailureDetection::ExitCode
        } else {
            configured
        }
    }
}

/// Run `zeta-deploy rebuild`.
///
/// # Errors
///
/// Returns an error if the connection fails, a command times out, or the
/// build is judged failed.
pub async fn run(args: &RebuildArgs, app: &AppContext) -> Result<()> {
    let config = app.load_config(&args.target)?;
    let opts = RebuildOptions {
        detection: args.detection(config.rebuild.failure_detection),
        ..RebuildOptions::default()
    };
    let session = connect(app, &config, args.target.password_file.as_deref()).await?;
    let reporter = app.terminal_reporter();

    let outcome = service::rebuild(&session, &reporter, &config, &opts).await;
    disconnect(&session).await;

    match outcome? {
        RebuildOutcome::Restarted => {
            app.output.success(&format!("{} rebuilt and restarted", config.service.name));
            Ok(())
        }
        RebuildOutcome::BuildFailed { exit_code } => Err(DeployError::BuildFailed { exit_code }.into()),
    }
}
