//! # spinup-process
//!
//! Process lifecycle primitives for spinup:
//! - `LaunchSpec` — what to run (executable, args, cwd, environment,
//!   stream bindings)
//! - `ProcessHandle` — starts the process, observes its exit out of
//!   band, and exposes terminate / wait-for-exit
//! - `HandleState` / `ExitSummary` — lifecycle state and exit result

pub mod config;
pub mod handle;
pub mod output;
pub mod state;

pub use config::{LaunchSpec, StdinMode};
pub use handle::ProcessHandle;
pub use output::OutputSink;
pub use state::{ExitSummary, HandleState};
