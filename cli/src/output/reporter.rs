//! `TerminalReporter`: the `ProgressReporter` the CLI hands to workflows.

use crate::application::ports::ProgressReporter;
use crate::domain::OutputView;
use crate::output::OutputContext;

/// Forwards workflow events to an [`OutputContext`].
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.ctx.step(message);
    }

    fn success(&self, message: &str) {
        self.ctx.success(message);
    }

    fn error(&self, message: &str) {
        self.ctx.error(message);
    }

    fn command(&self, command: &str) {
        self.ctx.command(command);
    }

    fn output(&self, view: &OutputView<'_>) {
        self.ctx.command_output(view);
    }
}
