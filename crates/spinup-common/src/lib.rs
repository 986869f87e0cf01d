//! # spinup-common
//!
//! Shared building blocks for the spinup workspace:
//! - Error taxonomy for launching and readiness waiting
//! - Progress reporting seam for user-facing messages

pub mod errors;
pub mod reporter;

pub use errors::{LaunchError, LaunchResult};
pub use reporter::{NullReporter, ProgressReporter, TracingReporter};
