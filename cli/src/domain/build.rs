//! Build outcome classification.

use serde::{Deserialize, Serialize};

use crate::domain::command::CommandResult;

/// How a build command's result is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureDetection {
    /// Failed only when the exit code is non-zero.
    ExitCode,
    /// Failed when the exit code is non-zero OR stdout mentions "error"
    /// in any case. Misfires on successful builds whose output contains the
    /// word, e.g. a crate named `thiserror`.
    #[default]
    ExitCodeOrErrorText,
}

/// Result of classifying a build command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildVerdict {
    Succeeded,
    Failed { exit_code: i32 },
}

/// Classify a build result. Always inspects the full, untruncated output.
#[must_use]
pub fn classify(result: &CommandResult, detection: FailureDetection) -> BuildVerdict {
    let failed = match detection {
        FailureDetection::ExitCode => !result.success(),
        FailureDetection::ExitCodeOrErrorText => {
            !result.success() || result.stdout.to_lowercase().contains("error")
        }
    };
    if failed {
        BuildVerdict::Failed {
            exit_code: result.exit_code,
        }
    } else {
        BuildVerdict::Succeeded
    }
}
