//! `zeta-deploy deploy`: provision the host and install the node service.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy::{self as service, DeployOptions, DeployOutcome, Endpoints};
use crate::commands::{TargetArgs, connect, disconnect};
use crate::domain::DeployError;
use crate::output::OutputContext;

/// Arguments for the deploy command.
#[derive(Args, Default)]
pub struct DeployArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Run `zeta-deploy deploy`.
///
/// # Errors
///
/// Returns an error if the connection fails, a command times out, or the
/// build fails.
pub async fn run(args: &DeployArgs, app: &AppContext) -> Result<()> {
    let config = app.load_config(&args.target)?;
    let session = connect(app, &config, args.target.password_file.as_deref()).await?;
    let reporter = app.terminal_reporter();

    let outcome = service::deploy(&session, &reporter, &config, &DeployOptions::default()).await;
    disconnect(&session).await;

    match outcome? {
        DeployOutcome::Deployed { endpoints } => {
            print_summary(&endpoints, &app.output);
            Ok(())
        }
        DeployOutcome::BuildFailed { exit_code } => Err(DeployError::BuildFailed { exit_code }.into()),
    }
}

fn print_summary(endpoints: &Endpoints, ctx: &OutputContext) {
    if ctx.quiet {
        return;
    }
    ctx.banner("=== DEPLOYMENT COMPLETE ===");
    ctx.kv("Node", &endpoints.to_string());
    ctx.kv("Web ", &endpoints.web_domain);
}
