//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod build;
pub mod command;
pub mod config;
pub mod error;
pub mod script;

pub use build::{BuildVerdict, FailureDetection, classify};
pub use command::{CommandResult, DisplayLimits, OutputView, tail};
pub use config::{Credentials, DeployConfig, Password, validate_config, validate_layout};
pub use error::{ConfigError, DeployError, RemoteError};
