//! Shared readiness-poll driver.

use async_trait::async_trait;
use spinup_common::{LaunchError, LaunchResult};
use spinup_polling::{PollOutcome, Poller};
use spinup_process::ProcessHandle;
use std::time::Duration;
use tracing::debug;

/// Default startup timeout shared by the polling launchers.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(300);

/// Strategy-specific signal that the started application is usable.
///
/// Implementations must be cheap to re-evaluate: the driver calls
/// `is_ready` once per poll tick for up to the full startup timeout.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    async fn is_ready(&self) -> bool;
}

/// Poll until the application is ready, the timeout elapses, or the
/// process dies.
///
/// Liveness is tested before the readiness signal on every tick; a
/// process that exits mid-wait fails immediately with
/// [`LaunchError::TerminatedBeforeReady`] instead of waiting out the
/// remaining timeout. A timeout with the process still running fails
/// with [`LaunchError::ReadinessTimeout`].
pub async fn wait_until_ready(
    handle: &ProcessHandle,
    check: &dyn ReadinessCheck,
    poller: &Poller,
    timeout: Duration,
) -> LaunchResult<()> {
    let handle_ref = handle;
    let check_ref = check;

    let outcome = poller
        .await_at_most(timeout, move || {
            let handle = handle_ref;
            let check = check_ref;
            async move {
                if !handle.is_running() {
                    let exit_code = handle.exit_summary().and_then(|summary| summary.code);
                    debug!(?exit_code, "process exited while waiting for readiness");
                    return Err(LaunchError::terminated_before_ready(exit_code));
                }
                Ok(check.is_ready().await)
            }
        })
        .await?;

    match outcome {
        PollOutcome::Ready => Ok(()),
        PollOutcome::TimedOut => Err(LaunchError::readiness_timeout(timeout)),
    }
}
