//! # spinup-console
//!
//! Log-pattern readiness: the application is considered ready once a
//! line of its stdout or stderr matches a configured regular
//! expression. Output is teed so the caller still sees every byte the
//! process emits, unchanged and in order.

pub mod launcher;
pub mod matcher;
pub mod tee;

pub use launcher::ConsoleAppLauncher;
pub use matcher::{MatchFlag, PatternMatchWriter};
pub use tee::{TeeDetach, TeeWriter};
