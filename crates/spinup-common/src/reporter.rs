//! Progress reporting seam.
//!
//! Launchers announce user-facing milestones ("Starting the
//! application...") through an injected reporter instead of a global
//! logger, so embedding tools can route the messages wherever they
//! surface build progress.

/// Receives user-facing progress messages from a launcher.
pub trait ProgressReporter: Send + Sync {
    fn info(&self, message: &str);
}

/// Default reporter: forwards messages to `tracing` at info level.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Reporter that discards all messages.
#[derive(Debug, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn info(&self, _message: &str) {}
}
