//! Single-attempt HTTP reachability probing.

use http_body_util::Empty;
use hyper::body::Bytes;
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use spinup_polling::{PollOutcome, Poller};
use std::convert::Infallible;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Connect/read timeout for a single probe attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause between attempts in [`ReachabilityProbe::wait_until_reachable`].
pub const DEFAULT_REACHABILITY_INTERVAL: Duration = Duration::from_secs(1);

/// Issues short-timeout GET requests and reports whether the expected
/// status was observed.
///
/// Every I/O failure — connection refused, timeout, DNS — means "not
/// reachable yet" and yields `false`. Unreachability during startup is
/// the normal case, not an error.
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    attempt_timeout: Duration,
}

impl Default for ReachabilityProbe {
    fn default() -> Self {
        Self {
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl ReachabilityProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Single GET attempt: true iff a response arrived with exactly
    /// `expected_status`.
    pub async fn probe(&self, url: &Uri, expected_status: u16) -> bool {
        let request = match Request::builder()
            .method(Method::GET)
            .uri(url.clone())
            .header("User-Agent", "spinup/0.1")
            .body(Empty::<Bytes>::new())
        {
            Ok(request) => request,
            Err(e) => {
                debug!(%url, error = %e, "could not build probe request");
                return false;
            }
        };

        let client = Client::builder(TokioExecutor::new()).build_http();

        match timeout(self.attempt_timeout, client.request(request)).await {
            Ok(Ok(response)) => {
                let reachable = response.status().as_u16() == expected_status;
                debug!(%url, status = %response.status(), reachable, "probe completed");
                reachable
            }
            Ok(Err(e)) => {
                debug!(%url, error = %e, "probe connection failed");
                false
            }
            Err(_) => {
                debug!(%url, attempt_timeout = ?self.attempt_timeout, "probe timed out");
                false
            }
        }
    }

    /// Probe once per second until the URL answers with the expected
    /// status or `wait_timeout` elapses. Returns whether the URL became
    /// reachable.
    pub async fn wait_until_reachable(
        &self,
        url: &Uri,
        expected_status: u16,
        wait_timeout: Duration,
    ) -> bool {
        let poller = Poller::new(DEFAULT_REACHABILITY_INTERVAL);
        let probe_ref = self;
        let url_ref = url;

        let outcome: Result<PollOutcome, Infallible> = poller
            .await_at_most(wait_timeout, move || {
                let probe = probe_ref;
                let url = url_ref;
                async move { Ok(probe.probe(url, expected_status).await) }
            })
            .await;

        matches!(outcome, Ok(PollOutcome::Ready))
    }
}
