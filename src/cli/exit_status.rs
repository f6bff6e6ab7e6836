use std::process::ExitCode;

use crate::issues::Issue;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed and found what it looked for
/// - `Failure` (1): `check` found issues, or a lookup matched nothing
/// - `Error` (2): Command failed (config error, extraction aborted, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_issues(issues: &[Issue]) -> Self {
        if issues.is_empty() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }

    /// `Success` when `found`, else `Failure`.
    pub fn found(found: bool) -> Self {
        if found {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
