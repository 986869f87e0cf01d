//! Process handle: start, observe, terminate, wait for exit.

use crate::config::{LaunchSpec, StdinMode};
use crate::output::pump_stream;
use crate::state::{ExitSummary, HandleState};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use spinup_common::{LaunchError, LaunchResult};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::{watch, Notify};
use tracing::{debug, error, info};

/// Owns one OS process.
///
/// `start()` spawns the process and hands the child to a background
/// exit observer task; from then on lifecycle state and the exit
/// summary are the only shared surface. The observer is the single
/// place the child is waited on and reaped, so exits are detected out
/// of band rather than by callers polling for liveness.
pub struct ProcessHandle {
    spec: LaunchSpec,
    shared: Arc<Shared>,
    exit_tx: Option<watch::Sender<Option<ExitSummary>>>,
    exit_rx: watch::Receiver<Option<ExitSummary>>,
    pid: Option<u32>,
    started_at: Option<DateTime<Utc>>,
}

/// State shared between the handle and the exit observer task.
struct Shared {
    state: RwLock<HandleState>,
    kill: Notify,
    kill_requested: AtomicBool,
}

impl ProcessHandle {
    /// Create a configured, not-yet-started handle.
    pub fn new(spec: LaunchSpec) -> Self {
        let (exit_tx, exit_rx) = watch::channel(None);
        Self {
            spec,
            shared: Arc::new(Shared {
                state: RwLock::new(HandleState::NotStarted),
                kill: Notify::new(),
                kill_requested: AtomicBool::new(false),
            }),
            exit_tx: Some(exit_tx),
            exit_rx,
            pid: None,
            started_at: None,
        }
    }

    /// Launch the OS process.
    ///
    /// On success the handle is in `Started` state and the exit
    /// observer is running. On failure the handle stays `NotStarted`
    /// and no OS resources are held.
    pub fn start(&mut self) -> LaunchResult<()> {
        {
            let state = self.shared.state.read();
            if *state != HandleState::NotStarted {
                return Err(LaunchError::invalid_state("start", state.to_string()));
            }
        }

        if self.spec.executable.is_empty() {
            return Err(LaunchError::configuration("executable must not be empty"));
        }

        let exit_tx = self
            .exit_tx
            .take()
            .ok_or_else(|| LaunchError::internal("exit channel already consumed"))?;

        let mut cmd = Command::new(&self.spec.executable);
        cmd.args(&self.spec.args);
        if let Some(dir) = &self.spec.working_dir {
            cmd.current_dir(dir);
        }
        for (name, value) in &self.spec.env {
            cmd.env(name, value);
        }
        cmd.stdin(match self.spec.stdin {
            StdinMode::Null => Stdio::null(),
            StdinMode::Inherit => Stdio::inherit(),
        });

        let stdout_sink = self.spec.stdout_sink.take();
        let stderr_sink = self.spec.stderr_sink.take();
        cmd.stdout(if stdout_sink.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        cmd.stderr(if stderr_sink.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                self.exit_tx = Some(exit_tx);
                self.spec.stdout_sink = stdout_sink;
                self.spec.stderr_sink = stderr_sink;
                return Err(LaunchError::spawn_failed(
                    &self.spec.executable,
                    e.to_string(),
                ));
            }
        };

        self.pid = child.id();
        self.started_at = Some(Utc::now());

        if let Some(sink) = stdout_sink {
            if let Some(stream) = child.stdout.take() {
                tokio::spawn(pump_stream(stream, sink, "stdout"));
            }
        }
        if let Some(sink) = stderr_sink {
            if let Some(stream) = child.stderr.take() {
                tokio::spawn(pump_stream(stream, sink, "stderr"));
            }
        }

        *self.shared.state.write() = HandleState::Started;
        info!(
            executable = %self.spec.executable,
            pid = ?self.pid,
            "process started"
        );

        let shared = Arc::clone(&self.shared);
        let executable = self.spec.executable.clone();
        tokio::spawn(async move {
            let status = tokio::select! {
                res = child.wait() => res,
                _ = shared.kill.notified() => {
                    if let Err(e) = child.start_kill() {
                        debug!(error = %e, "kill not delivered (process may have already exited)");
                    }
                    child.wait().await
                }
            };

            let aborted = shared.kill_requested.load(Ordering::SeqCst);
            let summary = match status {
                Ok(status) => ExitSummary::from_status(status, aborted),
                Err(e) => {
                    error!(executable = %executable, error = %e, "failed to wait for process");
                    ExitSummary::unknown(aborted)
                }
            };

            *shared.state.write() = if aborted {
                HandleState::ExitedAborted
            } else {
                HandleState::ExitedNormally
            };

            info!(
                executable = %executable,
                code = ?summary.code,
                aborted = summary.aborted,
                "process exited"
            );
            let _ = exit_tx.send(Some(summary));
        });

        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HandleState {
        *self.shared.state.read()
    }

    /// True while the process is running under active supervision.
    pub fn is_running(&self) -> bool {
        self.state() == HandleState::Started
    }

    /// OS process id, available once started.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// When the process was started.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Exit result, `None` until the process has exited.
    pub fn exit_summary(&self) -> Option<ExitSummary> {
        *self.exit_rx.borrow()
    }

    /// Release active supervision of a started process.
    ///
    /// The process keeps running; only the termination policy changes
    /// (`terminate()` stays effective). No-op once the process has
    /// exited.
    pub fn detach(&self) -> LaunchResult<()> {
        let mut state = self.shared.state.write();
        match *state {
            HandleState::NotStarted => Err(LaunchError::not_started("detach")),
            HandleState::Started => {
                *state = HandleState::Detached;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Request a forceful stop of the process.
    ///
    /// Effective from `Started` or `Detached`; a no-op once the
    /// process has exited. Does not block waiting for the exit — use
    /// [`wait_for_exit`](Self::wait_for_exit) for confirmation.
    pub fn terminate(&self) -> LaunchResult<()> {
        match self.state() {
            HandleState::NotStarted => Err(LaunchError::not_started("terminate")),
            HandleState::Started | HandleState::Detached => {
                self.shared.kill_requested.store(true, Ordering::SeqCst);
                self.shared.kill.notify_one();
                debug!(pid = ?self.pid, "termination requested");
                Ok(())
            }
            HandleState::ExitedNormally | HandleState::ExitedAborted => Ok(()),
        }
    }

    /// Block until the process has exited and return the exit summary.
    pub async fn wait_for_exit(&self) -> LaunchResult<ExitSummary> {
        if self.state() == HandleState::NotStarted {
            return Err(LaunchError::not_started("wait_for_exit"));
        }

        let mut rx = self.exit_rx.clone();
        let observed = rx
            .wait_for(|summary| summary.is_some())
            .await
            .map_err(|_| LaunchError::internal("exit observer stopped before reporting an exit"))?;
        (*observed).ok_or_else(|| LaunchError::internal("exit summary missing after notification"))
    }
}
