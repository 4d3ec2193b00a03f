//! Remote shell command builders.
//!
//! Every string returned here is sent verbatim to the remote login shell.
//! Interpolated values come from a configuration that has passed
//! [`crate::domain::config::validate_config`].

use crate::domain::config::{DeployConfig, NetworkConfig, ProjectConfig, ServiceConfig};

/// Host facts printed for the operator before anything is changed.
pub const SYSTEM_PROBES: [&str; 3] = ["uname -a", "free -h | head -3", "df -h / | tail -1"];

pub const INSTALL_BUILD_PACKAGES: &str =
    "apt update -qq && apt install -y -qq build-essential pkg-config libssl-dev git curl";

/// Exits non-zero when cargo is not on the login shell's `PATH`.
pub const PROBE_CARGO: &str = "which cargo";

pub const INSTALL_RUSTUP: &str =
    "curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s -- -y";

/// Makes a rustup-installed toolchain visible to a non-login shell.
const CARGO_ENV: &str = r#"[ -f "$HOME/.cargo/env" ] && . "$HOME/.cargo/env";"#;

pub const WEB_SERVER_PROBE: &str =
    "ps aux | grep -E 'flask|python.*app|nginx|apache' | grep -v grep || echo 'No web server detected'";

#[must_use]
pub fn rustc_version() -> String {
    format!("{CARGO_ENV} rustc --version")
}

#[must_use]
pub fn toolchain_versions() -> String {
    format!("{CARGO_ENV} rustc --version && cargo --version")
}

/// Exits 0 only when the checkout directory exists.
#[must_use]
pub fn probe_checkout(project: &ProjectConfig) -> String {
    format!("test -d {} && echo exists", project.checkout_dir)
}

#[must_use]
pub fn pull(project: &ProjectConfig) -> String {
    format!("cd {} && git pull", project.checkout_dir)
}

#[must_use]
pub fn clone(project: &ProjectConfig) -> String {
    format!(
        "cd {} && git clone {} {}",
        project.checkout_parent(),
        project.repo_url,
        project.checkout_dir
    )
}

/// Release build of the node.
///
/// With `tail_lines`, output is cut to the last lines on the remote side and
/// the pipeline runs under `pipefail` so the exit code is cargo's, not tail's.
#[must_use]
pub fn build(project: &ProjectConfig, tail_lines: Option<usize>) -> String {
    let node = project.node_path();
    match tail_lines {
        Some(lines) => format!(
            "bash -o pipefail -c '{CARGO_ENV} cd {node} && cargo build --release 2>&1 | tail -{lines}'"
        ),
        None => format!("{CARGO_ENV} cd {node} && cargo build --release 2>&1"),
    }
}

/// Kill any running node. Succeeds when nothing matches.
#[must_use]
pub fn stop_node(project: &ProjectConfig) -> String {
    format!("pkill -f {} || true", project.binary)
}

/// Open both node ports through ufw and iptables, ignoring either failing.
#[must_use]
pub fn open_ports(network: &NetworkConfig) -> String {
    let NetworkConfig { p2p_port: p2p, ws_port: ws, .. } = network;
    format!(
        "ufw allow {p2p}/tcp 2>/dev/null; ufw allow {ws}/tcp 2>/dev/null; \
         iptables -I INPUT -p tcp --dport {p2p} -j ACCEPT 2>/dev/null; \
         iptables -I INPUT -p tcp --dport {ws} -j ACCEPT 2>/dev/null; \
         echo 'Ports opened'"
    )
}

/// Render the systemd unit descriptor for the node.
#[must_use]
pub fn service_unit(config: &DeployConfig) -> String {
    let ServiceConfig {
        description,
        restart_sec,
        rust_log,
        ..
    } = &config.service;
    let exec_start = config.project.binary_path();
    format!(
        "[Unit]\n\
         Description={description}\n\
         After=network.target\n\
         \n\
         [Service]\n\
         Type=simple\n\
         ExecStart={exec_start}\n\
         Restart=always\n\
         RestartSec={restart_sec}\n\
         Environment=RUST_LOG={rust_log}\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n"
    )
}

/// Write the unit descriptor through a quoted heredoc, so nothing in it expands.
#[must_use]
pub fn write_service_unit(config: &DeployConfig) -> String {
    format!(
        "cat > {} << 'SERVICEEOF'\n{}SERVICEEOF",
        config.service.unit_path(),
        service_unit(config)
    )
}

#[must_use]
pub fn enable_and_restart(service: &ServiceConfig) -> String {
    let name = &service.name;
    format!("systemctl daemon-reload && systemctl enable {name} && systemctl restart {name}")
}

#[must_use]
pub fn restart(service: &ServiceConfig) -> String {
    format!("systemctl restart {}", service.name)
}

#[must_use]
pub fn status(service: &ServiceConfig, lines: usize) -> String {
    format!("systemctl status {} --no-pager -l | head -{lines}", service.name)
}

#[must_use]
pub fn journal(service: &ServiceConfig, lines: usize) -> String {
    format!("journalctl -u {} --no-pager -n {lines}", service.name)
}

#[must_use]
pub fn backup_web_asset(project: &ProjectConfig) -> String {
    let path = project.web_asset_path();
    format!("cp {path} {path}.bak 2>/dev/null; echo 'Web files ready'")
}

#[must_use]
pub fn listening_ports(network: &NetworkConfig) -> String {
    format!("ss -tlnp | grep -E '{}|{}'", network.p2p_port, network.ws_port)
}
