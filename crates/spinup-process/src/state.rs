//! Process lifecycle state and exit result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a [`crate::ProcessHandle`].
///
/// Transitions are monotonic: `NotStarted -> Started [-> Detached] ->
/// ExitedNormally | ExitedAborted`. No state is ever revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleState {
    /// Configured but not yet started.
    NotStarted,
    /// Running under active supervision of the launcher.
    Started,
    /// Running, but the launcher released active supervision.
    /// Termination stays effective in this state.
    Detached,
    /// Exited on its own; the exit summary carries the code.
    ExitedNormally,
    /// Exited after a termination request.
    ExitedAborted,
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleState::NotStarted => write!(f, "not_started"),
            HandleState::Started => write!(f, "started"),
            HandleState::Detached => write!(f, "detached"),
            HandleState::ExitedNormally => write!(f, "exited_normally"),
            HandleState::ExitedAborted => write!(f, "exited_aborted"),
        }
    }
}

impl HandleState {
    /// The OS process exists (started or detached).
    pub fn is_alive(&self) -> bool {
        matches!(self, HandleState::Started | HandleState::Detached)
    }

    /// The OS process has exited (normally or aborted).
    pub fn has_exited(&self) -> bool {
        matches!(
            self,
            HandleState::ExitedNormally | HandleState::ExitedAborted
        )
    }
}

/// Exit result of a process, recorded exactly once by the exit observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSummary {
    /// Exit code, if the process exited with one.
    pub code: Option<i32>,
    /// Terminating signal, if the process was killed by one (Unix only).
    pub signal: Option<i32>,
    /// Whether a termination request preceded the observed exit.
    pub aborted: bool,
    /// When the exit was observed.
    pub finished_at: DateTime<Utc>,
}

impl ExitSummary {
    pub(crate) fn from_status(status: std::process::ExitStatus, aborted: bool) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
            aborted,
            finished_at: Utc::now(),
        }
    }

    /// Exit status could not be determined.
    pub(crate) fn unknown(aborted: bool) -> Self {
        Self {
            code: None,
            signal: None,
            aborted,
            finished_at: Utc::now(),
        }
    }

    /// True when the process exited on its own with code zero.
    pub fn success(&self) -> bool {
        !self.aborted && self.code == Some(0)
    }
}
