//! Remote command results and the display policy applied to them.
//!
//! Pure functions only: no I/O, no async.

// ── Command result ───────────────────────────────────────────────────────────

/// Captured outcome of one remote command.
///
/// Always holds the full, untruncated streams. Truncation happens only when
/// building an [`OutputView`] for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Remote exit status. `-1` when the remote side closed without one.
    pub exit_code: i32,
}

impl CommandResult {
    #[must_use]
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Returns `true` when the command exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Build the truncated view shown to the operator.
    #[must_use]
    pub fn view(&self, limits: DisplayLimits) -> OutputView<'_> {
        OutputView {
            stdout: tail(self.stdout.trim(), limits.stdout),
            stderr: tail(self.stderr.trim(), limits.stderr),
            exit_code: self.exit_code,
        }
    }
}

// ── Display policy ───────────────────────────────────────────────────────────

/// Maximum number of trailing characters shown per stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLimits {
    pub stdout: usize,
    pub stderr: usize,
}

impl DisplayLimits {
    /// Limits used by the full deploy workflow.
    pub const DEPLOY: Self = Self {
        stdout: 2000,
        stderr: 1000,
    };

    /// Limits used by the rebuild workflow, which shows longer build logs.
    pub const REBUILD: Self = Self {
        stdout: 3000,
        stderr: 2000,
    };
}

/// Truncated, trimmed view of a [`CommandResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputView<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
    pub exit_code: i32,
}

/// Return the last `max_chars` characters of `text`.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
#[must_use]
pub fn tail(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return "";
    }
    match text.char_indices().rev().nth(max_chars - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
