//! `zeta-deploy config`: show the effective configuration.

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::domain::{script, validate_layout};
use crate::infra::config::PASSWORD_ENV;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Print the config file location
    Path,
    /// Print the systemd unit the deploy command installs
    Unit,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or is invalid.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Path => {
            println!("{}", app.config_store.path()?.display());
            Ok(())
        }
        ConfigCommand::Unit => {
            let config = app.config_store.load()?;
            validate_layout(&config)?;
            print!("{}", script::service_unit(&config));
            Ok(())
        }
    }
}

fn show_config(app: &AppContext) -> Result<()> {
    let config = app.config_store.load()?;
    let path = app.config_store.path()?;
    let yaml = serde_yaml::to_string(&config).context("cannot serialize config")?;

    app.output.kv("Config file", &path.display().to_string());
    let password = if std::env::var_os(PASSWORD_ENV).is_some() {
        format!("set via {PASSWORD_ENV}")
    } else {
        "not set".to_string()
    };
    app.output.kv("Password   ", &password);
    println!();
    print!("{yaml}");
    Ok(())
}
