//! Web launcher: readiness from HTTP reachability.

use crate::probe::ReachabilityProbe;
use async_trait::async_trait;
use hyper::Uri;
use spinup_common::{LaunchError, LaunchResult, ProgressReporter, TracingReporter};
use spinup_launch::{wait_until_ready, ReadinessCheck, DEFAULT_STARTUP_TIMEOUT};
use spinup_polling::Poller;
use spinup_process::{ExitSummary, LaunchSpec, ProcessHandle};
use std::time::Duration;

/// Status code identifying a ready application unless overridden.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

struct UrlReadiness {
    probe: ReachabilityProbe,
    url: Uri,
    expected_status: u16,
}

#[async_trait]
impl ReadinessCheck for UrlReadiness {
    async fn is_ready(&self) -> bool {
        self.probe.probe(&self.url, self.expected_status).await
    }
}

/// Starts an application and waits until its URL answers with the
/// expected status code.
///
/// Before anything is started the URL is probed once: finding it
/// already reachable means another instance is live, which either
/// fails the launch (`fail_if_already_running`, the default) or skips
/// it entirely — launching a second instance on top of a running one
/// is never useful.
pub struct WebAppLauncher {
    spec: Option<LaunchSpec>,
    application_url: Option<String>,
    expected_status: u16,
    fail_if_already_running: bool,
    timeout: Duration,
    poller: Poller,
    probe: ReachabilityProbe,
    reporter: Box<dyn ProgressReporter>,
    handle: Option<ProcessHandle>,
    launched: bool,
}

impl WebAppLauncher {
    pub fn new(spec: LaunchSpec) -> Self {
        Self {
            spec: Some(spec),
            application_url: None,
            expected_status: DEFAULT_EXPECTED_STATUS,
            fail_if_already_running: true,
            timeout: DEFAULT_STARTUP_TIMEOUT,
            poller: Poller::new(crate::probe::DEFAULT_REACHABILITY_INTERVAL),
            probe: ReachabilityProbe::new(),
            reporter: Box::new(TracingReporter),
            handle: None,
            launched: false,
        }
    }

    /// Absolute URL used to check whether the application has started.
    /// Required.
    pub fn application_url(mut self, url: impl Into<String>) -> Self {
        self.application_url = Some(url.into());
        self
    }

    /// Status code identifying a ready application (default 200).
    pub fn expected_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    /// Whether a pre-flight hit on the URL fails the launch
    /// (default true).
    pub fn fail_if_already_running(mut self, fail: bool) -> Self {
        self.fail_if_already_running = fail;
        self
    }

    /// Startup timeout (default 300 s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pause between reachability checks (default 1 s).
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poller = Poller::new(interval);
        self
    }

    /// Replace the probe, e.g. to shorten the per-attempt timeout.
    pub fn probe(mut self, probe: ReachabilityProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Start the process (unless the URL is already live) and block
    /// until the URL becomes reachable, the timeout elapses, or the
    /// process dies.
    ///
    /// On a readiness failure the started process stays reachable
    /// through [`handle`](Self::handle) for the caller's cleanup.
    pub async fn start(&mut self) -> LaunchResult<()> {
        let url_str = self
            .application_url
            .clone()
            .ok_or_else(|| LaunchError::configuration("application url is not configured"))?;
        let url: Uri = url_str.parse().map_err(|e| {
            LaunchError::configuration(format!("invalid application url `{url_str}`: {e}"))
        })?;
        let spec = self
            .spec
            .take()
            .ok_or_else(|| LaunchError::invalid_state("start", "started"))?;

        if self.probe.probe(&url, self.expected_status).await {
            if self.fail_if_already_running {
                return Err(LaunchError::already_running(url.to_string()));
            }
            self.reporter.info(&format!(
                "Application url {url} is already reachable, the application will not be started"
            ));
            return Ok(());
        }

        self.reporter.info(&format!(
            "Application url {url} is not reachable yet, starting the application..."
        ));
        let mut handle = ProcessHandle::new(spec);
        handle.start()?;
        self.launched = true;

        self.reporter
            .info("Waiting for the application url to become reachable...");
        let check = UrlReadiness {
            probe: self.probe.clone(),
            url: url.clone(),
            expected_status: self.expected_status,
        };
        let waited = wait_until_ready(&handle, &check, &self.poller, self.timeout).await;
        self.handle = Some(handle);

        waited?;
        self.reporter
            .info(&format!("The application url {url} is now reachable"));
        Ok(())
    }

    /// Whether this launcher actually started a process. False when the
    /// pre-flight probe found the application already running.
    pub fn was_launched(&self) -> bool {
        self.launched
    }

    /// The started process, if one was launched.
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
