//! Infrastructure implementation of the `RemoteShell` port over SSH.
//!
//! `SshSession` authenticates with a password and runs each command on its
//! own session channel. Host keys are not pinned: any key is accepted and its
//! fingerprint is logged.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use russh::client::{self, Handle};
use russh::{ChannelMsg, Disconnect};
use russh_keys::key::PublicKey;

use crate::application::ports::RemoteShell;
use crate::domain::{CommandResult, Credentials, RemoteError};

/// SSH extended-data stream number for stderr.
const SSH_EXTENDED_DATA_STDERR: u32 = 1;

/// Client handler that trusts whatever key the server presents.
pub struct AcceptAnyHostKey {
    host: String,
}

#[async_trait]
impl client::Handler for AcceptAnyHostKey {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        tracing::warn!(
            host = %self.host,
            fingerprint = %server_public_key.fingerprint(),
            "accepting unverified host key"
        );
        Ok(true)
    }
}

/// One authenticated SSH connection.
pub struct SshSession {
    handle: Handle<AcceptAnyHostKey>,
    host: String,
}

impl SshSession {
    /// Connect and authenticate. `timeout` bounds both steps together.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is unreachable, the timeout elapses, or
    /// the server rejects the password.
    pub async fn connect(creds: &Credentials, timeout: Duration) -> Result<Self> {
        tracing::debug!(host = %creds.host, port = creds.port, user = %creds.user, "connecting");
        let handshake = async {
            let config = Arc::new(client::Config::default());
            let handler = AcceptAnyHostKey {
                host: creds.host.clone(),
            };
            let mut handle = client::connect(config, (creds.host.as_str(), creds.port), handler)
                .await
                .with_context(|| format!("cannot connect to {}:{}", creds.host, creds.port))?;
            let accepted = handle
                .authenticate_password(creds.user.as_str(), creds.password.expose())
                .await
                .context("password authentication failed")?;
            if !accepted {
                return Err(anyhow::Error::from(RemoteError::AuthRejected {
                    user: creds.user.clone(),
                    host: creds.host.clone(),
                }));
            }
            anyhow::Ok(handle)
        };

        let handle = tokio::time::timeout(timeout, handshake)
            .await
            .map_err(|_| RemoteError::ConnectTimeout {
                host: creds.host.clone(),
                port: creds.port,
                timeout,
            })??;
        tracing::debug!(host = %creds.host, "authenticated");

        Ok(Self {
            handle,
            host: creds.host.clone(),
        })
    }
}

impl RemoteShell for SshSession {
    async fn exec(&self, command: &str, timeout: Duration) -> Result<CommandResult> {
        if self.handle.is_closed() {
            return Err(RemoteError::SessionClosed.into());
        }
        let mut channel = self
            .handle
            .channel_open_session()
            .await
            .with_context(|| format!("cannot open channel on {}", self.host))?;
        channel
            .exec(true, command)
            .await
            .context("cannot start remote command")?;

        let collect = async {
            let mut stdout = Vec::new();
            let mut stderr = Vec::new();
            let mut exit_code = None;
            while let Some(msg) = channel.wait().await {
                match msg {
                    ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
                    ChannelMsg::ExtendedData { ref data, ext } if ext == SSH_EXTENDED_DATA_STDERR => {
                        stderr.extend_from_slice(data);
                    }
                    ChannelMsg::ExitStatus { exit_status } => {
                        exit_code = Some(i32::try_from(exit_status).unwrap_or(-1));
                    }
                    _ => {}
                }
            }
            (stdout, stderr, exit_code)
        };

        let collected = tokio::time::timeout(timeout, collect).await;
        let Ok((stdout, stderr, exit_code)) = collected else {
            let _ = channel.close().await;
            return Err(RemoteError::CommandTimeout {
                command: command.lines().next().unwrap_or_default().to_string(),
                timeout,
            }
            .into());
        };

        if exit_code.is_none() {
            tracing::warn!("remote command closed without an exit status");
        }
        Ok(CommandResult::new(
            String::from_utf8_lossy(&stdout),
            String::from_utf8_lossy(&stderr),
            exit_code.unwrap_or(-1),
        ))
    }

    async fn close(&self) -> Result<()> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
            .context("cannot close SSH session")
    }
}
