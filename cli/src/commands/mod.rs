//! Command implementations

pub mod config;
pub mod deploy;
pub mod rebuild;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::RemoteShell;
use crate::domain::{Credentials, DeployConfig};
use crate::infra::config::resolve_password;
use crate::infra::ssh::SshSession;
use crate::output::progress;

/// Connection overrides shared by commands that talk to the host.
#[derive(Args, Default, Debug)]
pub struct TargetArgs {
    /// Remote host name or address
    #[arg(long, env = "ZETA_DEPLOY_HOST")]
    pub host: Option<String>,

    /// Login user
    #[arg(long, env = "ZETA_DEPLOY_USER")]
    pub user: Option<String>,

    /// SSH port
    #[arg(long)]
    pub port: Option<u16>,

    /// Read the password from this file instead of ZETA_DEPLOY_PASSWORD
    #[arg(long, value_name = "PATH")]
    pub password_file: Option<PathBuf>,
}

impl TargetArgs {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, config: &mut DeployConfig) {
        if let Some(host) = &self.host {
            config.target.host = Some(host.clone());
        }
        if let Some(user) = &self.user {
            config.target.user.clone_from(user);
        }
        if let Some(port) = self.port {
            config.target.port = port;
        }
    }
}

/// Open an authenticated session to the configured host.
///
/// Any failure here is fatal for the command; there is no retry.
async fn connect(
    app: &AppContext,
    config: &DeployConfig,
    password_file: Option<&Path>,
) -> Result<SshSession> {
    let creds = Credentials {
        host: config.target.host.clone().unwrap_or_default(),
        port: config.target.port,
        user: config.target.user.clone(),
        password: resolve_password(password_file)?,
    };

    let msg = format!("connecting to {}...", creds.host);
    let pb = app.output.show_progress().then(|| progress::spinner(&msg));
    if pb.is_none() {
        app.output.info(&msg);
    }

    match SshSession::connect(&creds, config.target.connect_timeout()).await {
        Ok(session) => {
            if let Some(pb) = &pb {
                progress::finish_ok(pb, &format!("connected to {}", creds.host));
            } else {
                app.output.success("connected");
            }
            Ok(session)
        }
        Err(e) => {
            if let Some(pb) = &pb {
                progress::finish_error(pb, &format!("cannot connect to {}", creds.host));
            }
            Err(e)
        }
    }
}

/// Close the session, logging instead of failing.
async fn disconnect(session: &SshSession) {
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "closing session");
    }
}
