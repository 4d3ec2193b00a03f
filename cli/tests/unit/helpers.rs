//! Shared test helpers: a scripted `RemoteShell` and a recording reporter.

#![allow(dead_code, clippy::expect_used)]

use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use zeta_deploy::application::ports::{ProgressReporter, RemoteShell};
use zeta_deploy::domain::{CommandResult, DeployConfig, OutputView};

// ── Result constructors ──────────────────────────────────────────────────────

pub fn ok(stdout: &str) -> CommandResult {
    CommandResult::new(stdout, "", 0)
}

pub fn exit(code: i32) -> CommandResult {
    CommandResult::new("", "", code)
}

pub fn config() -> DeployConfig {
    let mut config = DeployConfig::default();
    config.target.host = Some("203.0.113.7".to_string());
    config
}

// ── Scripted shell ───────────────────────────────────────────────────────────

/// In-memory `RemoteShell`.
///
/// Each command is matched against the scripted rules in order; the first
/// rule whose needle is a substring of the command supplies the result.
/// Unmatched commands succeed with empty output.
#[derive(Default)]
pub struct FakeShell {
    rules: Vec<(String, CommandResult)>,
    error_on: Option<String>,
    log: Mutex<Vec<(String, Duration)>>,
    closed: Mutex<bool>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `result` for commands containing `needle`.
    pub fn respond(mut self, needle: &str, result: CommandResult) -> Self {
        self.rules.push((needle.to_string(), result));
        self
    }

    /// Fail the transport for commands containing `needle`.
    pub fn fail_on(mut self, needle: &str) -> Self {
        self.error_on = Some(needle.to_string());
        self
    }

    /// Commands issued so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.log
            .lock()
            .expect("lock")
            .iter()
            .map(|(cmd, _)| cmd.clone())
            .collect()
    }

    /// Timeout passed with the first command containing `needle`.
    pub fn timeout_for(&self, needle: &str) -> Option<Duration> {
        self.log
            .lock()
            .expect("lock")
            .iter()
            .find(|(cmd, _)| cmd.contains(needle))
            .map(|(_, t)| *t)
    }

    pub fn issued(&self, needle: &str) -> bool {
        self.commands().iter().any(|c| c.contains(needle))
    }

    pub fn position(&self, needle: &str) -> Option<usize> {
        self.commands().iter().position(|c| c.contains(needle))
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock().expect("lock")
    }
}

impl RemoteShell for FakeShell {
    async fn exec(&self, command: &str, timeout: Duration) -> Result<CommandResult> {
        self.log
            .lock()
            .expect("lock")
            .push((command.to_string(), timeout));
        if let Some(needle) = &self.error_on {
            if command.contains(needle.as_str()) {
                anyhow::bail!("connection reset by peer");
            }
        }
        Ok(self
            .rules
            .iter()
            .find(|(needle, _)| command.contains(needle.as_str()))
            .map_or_else(|| ok(""), |(_, result)| result.clone()))
    }

    async fn close(&self) -> Result<()> {
        *self.closed.lock().expect("lock") = true;
        Ok(())
    }
}

// ── Recording reporter ───────────────────────────────────────────────────────

/// Everything the workflow told the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Step(String),
    Success(String),
    Error(String),
    Command(String),
    Output {
        stdout: String,
        stderr: String,
        exit_code: i32,
    },
}

#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("lock").clone()
    }

    /// Displayed output for the first command containing `needle`.
    pub fn output_for(&self, needle: &str) -> Option<(String, String, i32)> {
        let events = self.events();
        let idx = events
            .iter()
            .position(|e| matches!(e, Event::Command(c) if c.contains(needle)))?;
        events[idx + 1..].iter().find_map(|e| match e {
            Event::Output {
                stdout,
                stderr,
                exit_code,
            } => Some((stdout.clone(), stderr.clone(), *exit_code)),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().expect("lock").push(event);
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push(Event::Step(message.to_string()));
    }
    fn success(&self, message: &str) {
        self.push(Event::Success(message.to_string()));
    }
    fn error(&self, message: &str) {
        self.push(Event::Error(message.to_string()));
    }
    fn command(&self, command: &str) {
        self.push(Event::Command(command.to_string()));
    }
    fn output(&self, view: &OutputView<'_>) {
        self.push(Event::Output {
            stdout: view.stdout.to_string(),
            stderr: view.stderr.to_string(),
            exit_code: view.exit_code,
        });
    }
}
