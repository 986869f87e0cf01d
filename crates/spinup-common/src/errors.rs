//! Error types for launching applications and waiting for readiness.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for launch and readiness operations.
pub type LaunchResult<T> = std::result::Result<T, LaunchError>;

/// Errors surfaced while starting an application or waiting for it to
/// become ready.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The OS refused to start the process (bad path, permissions).
    #[error("failed to spawn `{executable}`: {reason}")]
    Spawn { executable: String, reason: String },

    /// A required readiness parameter is missing or invalid. Raised
    /// before any process is started.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// The pre-flight probe found the application already reachable.
    #[error("application at {url} is already running")]
    AlreadyRunning { url: String },

    /// The process exited while readiness was still being polled.
    #[error("process exited before becoming ready (exit code: {exit_code:?})")]
    TerminatedBeforeReady { exit_code: Option<i32> },

    /// The bounded poll exhausted its timeout with the process still
    /// running but never ready.
    #[error("application did not become ready within {timeout:?}")]
    ReadinessTimeout { timeout: Duration },

    /// An operation that requires a started process was called before
    /// `start()`.
    #[error("{operation} called before the process was started")]
    NotStarted { operation: String },

    /// An operation was called in a lifecycle state that does not
    /// permit it.
    #[error("{operation} is not allowed in state {state}")]
    InvalidState { operation: String, state: String },

    /// I/O error from stream plumbing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violation (should not happen in normal use).
    #[error("internal error: {0}")]
    Internal(String),
}

impl LaunchError {
    pub fn spawn_failed(executable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Spawn {
            executable: executable.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    pub fn already_running(url: impl Into<String>) -> Self {
        Self::AlreadyRunning { url: url.into() }
    }

    pub fn terminated_before_ready(exit_code: Option<i32>) -> Self {
        Self::TerminatedBeforeReady { exit_code }
    }

    pub fn readiness_timeout(timeout: Duration) -> Self {
        Self::ReadinessTimeout { timeout }
    }

    pub fn not_started(operation: impl Into<String>) -> Self {
        Self::NotStarted {
            operation: operation.into(),
        }
    }

    pub fn invalid_state(operation: impl Into<String>, state: impl Into<String>) -> Self {
        Self::InvalidState {
            operation: operation.into(),
            state: state.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal(reason.into())
    }
}
