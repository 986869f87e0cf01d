//! # spinup-launch
//!
//! The launcher layer: start an application asynchronously and,
//! optionally, block until a readiness strategy reports it usable.
//!
//! - [`AppLauncher`] starts a process and returns immediately with a
//!   running handle (no readiness wait).
//! - [`ReadinessCheck`] + [`wait_until_ready`] are the shared plumbing
//!   that strategy-specific launchers build on: one poll loop testing
//!   "(process still running) AND (strategy signal)", with premature
//!   process death and timeout reported as distinct failures.

pub mod launcher;
pub mod readiness;

pub use launcher::AppLauncher;
pub use readiness::{wait_until_ready, ReadinessCheck, DEFAULT_STARTUP_TIMEOUT};
