//! Domain types and validators for the deploy configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::build::FailureDetection;
use crate::domain::error::ConfigError;

/// Names interpolated into remote shell commands and unit file paths.
pub static UNIT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.@-]*$").expect("valid regex")
});

/// Shell metacharacters that must not appear in interpolated paths or URLs.
pub static SHELL_METACHAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"[;|&`$()\\<>!#~*\[\]{}'\x22\s]").expect("valid regex")
});

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.zeta-deploy/config.yaml`.
///
/// Never carries the password; see [`Credentials`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    pub target: TargetConfig,
    pub project: ProjectConfig,
    pub service: ServiceConfig,
    pub network: NetworkConfig,
    pub rebuild: RebuildConfig,
}

/// Remote host and login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TargetConfig {
    /// Hostname or IP address. Required; there is no default host.
    pub host: Option<String>,
    pub port: u16,
    pub user: String,
    pub connect_timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 22,
            user: "root".to_string(),
            connect_timeout_secs: 15,
        }
    }
}

impl TargetConfig {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Source checkout and build layout on the remote host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    pub repo_url: String,
    /// Absolute path of the git checkout.
    pub checkout_dir: String,
    /// Cargo project directory, relative to `checkout_dir`.
    pub node_dir: String,
    /// Release binary name, also used to match running processes.
    pub binary: String,
    /// Web asset backed up after deploy, relative to `checkout_dir`.
    pub web_asset: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/cTHE0/zeta4.git".to_string(),
            checkout_dir: "/root/zeta4".to_string(),
            node_dir: "zetanetwork-node".to_string(),
            binary: "zetanetwork-node".to_string(),
            web_asset: "zetanetwork-web/index.html".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Absolute path of the cargo project.
    #[must_use]
    pub fn node_path(&self) -> String {
        format!("{}/{}", self.checkout_dir.trim_end_matches('/'), self.node_dir)
    }

    /// Absolute path of the release binary.
    #[must_use]
    pub fn binary_path(&self) -> String {
        format!("{}/target/release/{}", self.node_path(), self.binary)
    }

    /// Absolute path of the web asset.
    #[must_use]
    pub fn web_asset_path(&self) -> String {
        format!("{}/{}", self.checkout_dir.trim_end_matches('/'), self.web_asset)
    }

    /// Directory the checkout is cloned into.
    #[must_use]
    pub fn checkout_parent(&self) -> &str {
        let trimmed = self.checkout_dir.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) | None => "/",
            Some(idx) => &trimmed[..idx],
        }
    }
}

/// systemd unit settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub description: String,
    pub restart_sec: u32,
    /// Value of `RUST_LOG` in the unit environment.
    pub rust_log: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "zetanode".to_string(),
            description: "Zeta Network Node".to_string(),
            restart_sec: 5,
            rust_log: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    #[must_use]
    pub fn unit_path(&self) -> String {
        format!("/etc/systemd/system/{}.service", self.name)
    }
}

/// Ports opened on the host and the public web endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    pub p2p_port: u16,
    pub ws_port: u16,
    pub web_domain: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            p2p_port: 9090,
            ws_port: 9091,
            web_domain: "zetanetwork.org".to_string(),
        }
    }
}

/// Rebuild workflow settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RebuildConfig {
    pub failure_detection: FailureDetection,
}

// ── Credentials ──────────────────────────────────────────────────────────────

/// Login password. `Debug` and `Display` never reveal the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(********)")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("********")
    }
}

/// Everything needed to open a session.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Password,
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validate a configuration before any remote command is built from it.
///
/// # Errors
///
/// Returns the first invalid field found.
pub fn validate_config(config: &DeployConfig) -> Result<(), ConfigError> {
    let host = config.target.host.as_deref().unwrap_or("").trim();
    if host.is_empty() {
        return Err(ConfigError::MissingHost);
    }
    if config.target.connect_timeout_secs == 0 {
        return Err(invalid("target.connect_timeout_secs", "0", "must be at least 1"));
    }
    validate_layout(config)
}

/// Validate everything that ends up inside remote commands or the unit file.
///
/// Unlike [`validate_config`], does not require a target host.
///
/// # Errors
///
/// Returns the first invalid field found.
pub fn validate_layout(config: &DeployConfig) -> Result<(), ConfigError> {
    check_name("service.name", &config.service.name)?;
    check_name("project.binary", &config.project.binary)?;

    if !config.project.checkout_dir.starts_with('/') {
        return Err(invalid(
            "project.checkout_dir",
            &config.project.checkout_dir,
            "must be an absolute path",
        ));
    }
    check_shell_safe("project.checkout_dir", &config.project.checkout_dir)?;
    check_shell_safe("project.node_dir", &config.project.node_dir)?;
    check_shell_safe("project.web_asset", &config.project.web_asset)?;
    check_shell_safe("project.repo_url", &config.project.repo_url)?;

    // Written verbatim into the unit file, one directive per line.
    for (key, value) in [
        ("service.description", &config.service.description),
        ("service.rust_log", &config.service.rust_log),
    ] {
        if value.contains('\n') || value.contains('\r') {
            return Err(invalid(key, value, "must be a single line"));
        }
    }

    let net = &config.network;
    if net.p2p_port == 0 || net.ws_port == 0 {
        return Err(invalid("network", "0", "ports must be non-zero"));
    }
    if net.p2p_port == net.ws_port {
        return Err(invalid(
            "network.ws_port",
            &net.ws_port.to_string(),
            "must differ from network.p2p_port",
        ));
    }
    Ok(())
}

fn check_name(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if UNIT_NAME_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid(key, value, "allowed characters are A-Z a-z 0-9 _ . @ -"))
    }
}

fn check_shell_safe(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(invalid(key, value, "must not be empty"));
    }
    if SHELL_METACHAR_RE.is_match(value) {
        return Err(invalid(key, value, "contains shell metacharacters or whitespace"));
    }
    Ok(())
}

fn invalid(key: &'static str, value: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
