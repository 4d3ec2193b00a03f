//! Operator-facing terminal output.
//!
//! Everything a workflow shows goes through [`OutputContext`]: status lines,
//! the `>>> command` echo, and the truncated streams of each remote result.
//! Logging is separate and goes to stderr through `tracing`.

pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::domain::OutputView;

/// True when `NO_COLOR` is set to a non-empty value.
fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Styling and terminal state for one CLI invocation.
pub struct OutputContext {
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Suppress everything except errors.
    pub quiet: bool,
}

impl OutputContext {
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();

        let mut styles = Styles::default();
        if is_tty && !no_color && !no_color_env() {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on an interactive, non-quiet terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    fn status(&self, marker: &str, style: owo_colors::Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", marker.style(style));
        }
    }

    /// `→ msg`, announcing the next workflow step.
    pub fn step(&self, msg: &str) {
        self.status("→", self.styles.header, msg);
    }

    pub fn success(&self, msg: &str) {
        self.status("✓", self.styles.success, msg);
    }

    pub fn info(&self, msg: &str) {
        self.status("ℹ", self.styles.info, msg);
    }

    /// Printed to stderr, even when quiet.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Echo a remote command before it runs.
    pub fn command(&self, command: &str) {
        if !self.quiet {
            println!("\n{} {command}", ">>>".style(self.styles.command));
        }
    }

    /// Print what a remote command returned.
    pub fn command_output(&self, view: &OutputView<'_>) {
        if self.quiet {
            return;
        }
        for line in self.transcript(view) {
            println!("{line}");
        }
    }

    /// Lines shown for a command result: stdout, `STDERR:` block, exit code.
    /// Streams that are empty after trimming are left out.
    #[must_use]
    pub fn transcript(&self, view: &OutputView<'_>) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        if !view.stdout.is_empty() {
            lines.push(view.stdout.to_string());
        }
        if !view.stderr.is_empty() {
            lines.push(format!("{} {}", "STDERR:".style(self.styles.warning), view.stderr));
        }
        let exit_style = if view.exit_code == 0 {
            self.styles.dim
        } else {
            self.styles.error
        };
        lines.push(format!("{}", format!("[exit: {}]", view.exit_code).style(exit_style)));
        lines
    }

    /// A blank line and a highlighted title, opening a summary block.
    pub fn banner(&self, title: &str) {
        if !self.quiet {
            println!("\n  {}", title.style(self.styles.header));
        }
    }

    /// `key  value` with the key dimmed.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}
