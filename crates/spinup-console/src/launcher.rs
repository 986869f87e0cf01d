//! Console launcher: readiness from a log-pattern match.

use crate::matcher::{MatchFlag, PatternMatchWriter};
use crate::tee::TeeWriter;
use async_trait::async_trait;
use regex::Regex;
use spinup_common::{LaunchError, LaunchResult, ProgressReporter, TracingReporter};
use spinup_launch::{wait_until_ready, ReadinessCheck, DEFAULT_STARTUP_TIMEOUT};
use spinup_polling::Poller;
use spinup_process::{ExitSummary, LaunchSpec, OutputSink, ProcessHandle};
use std::io;
use std::time::Duration;

/// Ready once either stream's matcher has latched. A startup banner may
/// appear on stdout or stderr depending on how the application logs.
struct PatternReadiness {
    stdout: MatchFlag,
    stderr: MatchFlag,
}

#[async_trait]
impl ReadinessCheck for PatternReadiness {
    async fn is_ready(&self) -> bool {
        self.stdout.is_matched() || self.stderr.is_matched()
    }
}

/// Starts an application and waits until a line of its output matches
/// a regular expression.
///
/// Both output streams are teed: every byte still reaches the
/// configured stdout/stderr destinations (the launching process's own
/// streams by default), while a per-stream matcher scans for the
/// pattern. Once the wait ends the matchers are detached so they do
/// not stay attached for the rest of the process's lifetime.
pub struct ConsoleAppLauncher {
    spec: Option<LaunchSpec>,
    pattern: Option<Regex>,
    timeout: Duration,
    poller: Poller,
    reporter: Box<dyn ProgressReporter>,
    stdout: Option<OutputSink>,
    stderr: Option<OutputSink>,
    handle: Option<ProcessHandle>,
}

impl ConsoleAppLauncher {
    pub fn new(spec: LaunchSpec) -> Self {
        Self {
            spec: Some(spec),
            pattern: None,
            timeout: DEFAULT_STARTUP_TIMEOUT,
            poller: Poller::default(),
            reporter: Box::new(TracingReporter),
            stdout: None,
            stderr: None,
            handle: None,
        }
    }

    /// The pattern identifying a ready application. Required.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Startup timeout (default 300 s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pause between readiness checks (default 100 ms).
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poller = Poller::new(interval);
        self
    }

    pub fn reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Where the child's stdout should end up (default: this process's
    /// stdout).
    pub fn stdout(mut self, sink: OutputSink) -> Self {
        self.stdout = Some(sink);
        self
    }

    /// Where the child's stderr should end up (default: this process's
    /// stderr).
    pub fn stderr(mut self, sink: OutputSink) -> Self {
        self.stderr = Some(sink);
        self
    }

    /// Start the process and block until the pattern matches, the
    /// timeout elapses, or the process dies.
    ///
    /// On a readiness failure the started process is left running and
    /// stays reachable through [`handle`](Self::handle) so the caller's
    /// cleanup can [`terminate`](Self::terminate) it.
    pub async fn start(&mut self) -> LaunchResult<()> {
        let pattern = self
            .pattern
            .clone()
            .ok_or_else(|| LaunchError::configuration("readiness pattern is not configured"))?;
        let spec = self
            .spec
            .take()
            .ok_or_else(|| LaunchError::invalid_state("start", "started"))?;

        let stdout_matcher = PatternMatchWriter::new(pattern.clone());
        let stdout_flag = stdout_matcher.match_flag();
        let stdout_tee = TeeWriter::new(
            self.stdout.take().unwrap_or_else(|| Box::new(io::stdout())),
            Box::new(stdout_matcher),
        );
        let stdout_detach = stdout_tee.detach_handle();

        let stderr_matcher = PatternMatchWriter::new(pattern);
        let stderr_flag = stderr_matcher.match_flag();
        let stderr_tee = TeeWriter::new(
            self.stderr.take().unwrap_or_else(|| Box::new(io::stderr())),
            Box::new(stderr_matcher),
        );
        let stderr_detach = stderr_tee.detach_handle();

        let spec = spec
            .stdout(Box::new(stdout_tee))
            .stderr(Box::new(stderr_tee));

        self.reporter.info("Starting the application...");
        let mut handle = ProcessHandle::new(spec);
        handle.start()?;

        self.reporter
            .info("Waiting for the application to become ready...");
        let check = PatternReadiness {
            stdout: stdout_flag,
            stderr: stderr_flag,
        };
        let waited = wait_until_ready(&handle, &check, &self.poller, self.timeout).await;

        stdout_detach.detach();
        stderr_detach.detach();
        self.handle = Some(handle);

        waited?;
        self.reporter.info("The application is now ready");
        Ok(())
    }

    /// The started process, if a start was attempted.
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
