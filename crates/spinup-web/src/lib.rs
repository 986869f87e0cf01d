//! # spinup-web
//!
//! HTTP readiness: the application is considered ready once a GET
//! against its URL answers with the expected status code. Transient
//! unreachability during startup is the expected case, so probe
//! failures are reported as "not yet", never as errors.

pub mod launcher;
pub mod probe;

pub use launcher::{WebAppLauncher, DEFAULT_EXPECTED_STATUS};
pub use probe::{ReachabilityProbe, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_REACHABILITY_INTERVAL};
