//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::AppContext;
use crate::commands;

/// Deploy and rebuild a Zeta Network node over SSH
#[derive(Parser)]
#[command(
    name = "zeta-deploy",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honoured: any non-empty NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install tooling, build the node and (re)install its service
    Deploy(commands::deploy::DeployArgs),

    /// Pull, rebuild and restart an already deployed node
    Rebuild(commands::rebuild::RebuildArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "warn,zeta_deploy=debug"
        } else {
            "warn"
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            no_color,
            quiet,
            command,
            ..
        } = self;
        let app = AppContext::new(no_color, quiet);
        match command {
            Command::Version => {
                commands::version::run();
                Ok(())
            }
            Command::Deploy(args) => commands::deploy::run(&args, &app).await,
            Command::Rebuild(args) => commands::rebuild::run(&args, &app).await,
            Command::Config(cmd) => commands::config::run(&app, &cmd),
        }
    }
}
