//! # spinup-polling
//!
//! A bounded poll: re-evaluate a predicate at a fixed interval until it
//! reports true or a timeout elapses. Timeout is a distinct outcome,
//! not an error; predicate errors are terminal and propagate
//! immediately without waiting out the remaining timeout.

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::trace;

/// Default pause between predicate evaluations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of a bounded poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The predicate reported true.
    Ready,
    /// The timeout elapsed with the predicate still false.
    TimedOut,
}

/// Re-evaluates a predicate at a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Evaluate `predicate` until it returns true or `timeout` elapses.
    ///
    /// The predicate is evaluated immediately and at least once, even
    /// with a zero timeout. Evaluations are serialized; the poller
    /// sleeps for the fixed interval between them. An `Err` from the
    /// predicate is returned as-is without further evaluations.
    pub async fn await_at_most<F, Fut, E>(
        &self,
        timeout: Duration,
        mut predicate: F,
    ) -> Result<PollOutcome, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        let started = Instant::now();
        let mut evaluations = 0u32;

        loop {
            evaluations += 1;
            if predicate().await? {
                trace!(evaluations, "poll predicate satisfied");
                return Ok(PollOutcome::Ready);
            }

            if started.elapsed() >= timeout {
                trace!(evaluations, ?timeout, "poll timed out");
                return Ok(PollOutcome::TimedOut);
            }

            sleep(self.interval).await;
        }
    }
}
