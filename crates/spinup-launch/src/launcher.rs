//! Plain asynchronous launcher (no readiness wait).

use spinup_common::{LaunchError, LaunchResult, ProgressReporter, TracingReporter};
use spinup_process::{ExitSummary, LaunchSpec, ProcessHandle};

/// Starts a process asynchronously and returns as soon as the OS has
/// accepted the spawn. Callers that need a readiness gate use the
/// console or web launchers instead.
pub struct AppLauncher {
    spec: Option<LaunchSpec>,
    reporter: Box<dyn ProgressReporter>,
    handle: Option<ProcessHandle>,
}

impl AppLauncher {
    pub fn new(spec: LaunchSpec) -> Self {
        Self {
            spec: Some(spec),
            reporter: Box::new(TracingReporter),
            handle: None,
        }
    }

    /// Replace the progress reporter.
    pub fn reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Start the process. Must be called at most once.
    pub fn start(&mut self) -> LaunchResult<()> {
        let spec = self
            .spec
            .take()
            .ok_or_else(|| LaunchError::invalid_state("start", "started"))?;

        self.reporter.info("Starting the application...");
        let mut handle = ProcessHandle::new(spec);
        handle.start()?;
        self.handle = Some(handle);
        Ok(())
    }

    /// The started process, once `start()` has succeeded.
    pub fn handle(&self) -> Option<&ProcessHandle> {
        self.handle.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(ProcessHandle::is_running)
    }

    pub fn terminate(&self) -> LaunchResult<()> {
        self.started_handle("terminate")?.terminate()
    }

    pub async fn wait_for_exit(&self) -> LaunchResult<ExitSummary> {
        self.started_handle("wait_for_exit")?.wait_for_exit().await
    }

    fn started_handle(&self, operation: &str) -> LaunchResult<&ProcessHandle> {
        self.handle
            .as_ref()
            .ok_or_else(|| LaunchError::not_started(operation))
    }
}
