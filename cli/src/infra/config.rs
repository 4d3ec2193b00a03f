//! Infrastructure implementation of the `ConfigStore` port, plus password
//! sources.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::{ConfigError, DeployConfig, Password};

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "ZETA_DEPLOY_CONFIG";
/// Supplies the login password.
pub const PASSWORD_ENV: &str = "ZETA_DEPLOY_PASSWORD";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<DeployConfig> {
        let path = self.path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(DeployConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".zeta-deploy").join("config.yaml"))
    }
}

/// Resolve the login password: a password file wins over the environment.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is empty, or if neither
/// source supplies a password.
pub fn resolve_password(password_file: Option<&Path>) -> Result<Password> {
    if let Some(path) = password_file {
        return read_password_file(path);
    }
    match std::env::var(PASSWORD_ENV) {
        Ok(value) if !value.is_empty() => Ok(Password::new(value)),
        _ => Err(ConfigError::MissingPassword.into()),
    }
}

/// Read the first line of `path` as the password.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its first line is empty.
pub fn read_password_file(path: &Path) -> Result<Password> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read password file {}", path.display()))?;
    let line = content.lines().next().unwrap_or_default();
    if line.is_empty() {
        return Err(ConfigError::EmptyPasswordFile(path.display().to_string()).into());
    }
    Ok(Password::new(line))
}
