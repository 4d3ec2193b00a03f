//! Application context: unified state passed to every command handler.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::commands::TargetArgs;
use crate::domain::{DeployConfig, validate_config};
use crate::infra::config::YamlConfigStore;
use crate::output::{OutputContext, TerminalReporter};

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()`.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Where the deploy configuration lives.
    pub config_store: YamlConfigStore,
}

impl AppContext {
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        Self {
            output: OutputContext::new(no_color, quiet),
            config_store: YamlConfigStore,
        }
    }

    /// Reporter that prints workflow progress to the terminal.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Load the config file, apply command-line overrides, and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the result is invalid.
    pub fn load_config(&self, target: &TargetArgs) -> Result<DeployConfig> {
        let mut config = self.config_store.load()?;
        target.apply(&mut config);
        validate_config(&config)?;
        Ok(config)
    }
}
