//! End-to-end scenarios for HTTP readiness.

use e2e_tests::{free_port, init_tracing, spawn_status_server};
use spinup_common::{LaunchError, NullReporter};
use spinup_process::LaunchSpec;
use spinup_web::{ReachabilityProbe, WebAppLauncher};
use std::time::{Duration, Instant};

const TESTEXE: &str = env!("CARGO_BIN_EXE_testexe");

fn testexe() -> LaunchSpec {
    LaunchSpec::new(TESTEXE)
}

fn fast_probe() -> ReachabilityProbe {
    ReachabilityProbe::new().with_attempt_timeout(Duration::from_secs(2))
}

#[tokio::test]
async fn test_ready_when_url_becomes_reachable() {
    init_tracing();
    let port = free_port().await;
    let spec = testexe().args([
        "--http-port",
        &port.to_string(),
        "--startup-delay-ms",
        "300",
    ]);
    let mut launcher = WebAppLauncher::new(spec)
        .application_url(format!("http://127.0.0.1:{port}/"))
        .timeout(Duration::from_secs(10))
        .poll_interval(Duration::from_millis(100))
        .probe(fast_probe())
        .reporter(Box::new(NullReporter));

    let started = Instant::now();
    launcher.start().await.unwrap();
    assert!(
        started.elapsed() < Duration::from_secs(8),
        "readiness took {:?}",
        started.elapsed()
    );
    assert!(launcher.was_launched());
    assert!(launcher.is_running());

    launcher.terminate().unwrap();
    let summary = launcher.wait_for_exit().await.unwrap();
    assert!(summary.aborted);
}

#[tokio::test]
async fn test_already_running_fails_without_launching() {
    init_tracing();
    let addr = spawn_status_server(200).await;
    let mut launcher = WebAppLauncher::new(testexe())
        .application_url(format!("http://{addr}/"))
        .probe(fast_probe())
        .reporter(Box::new(NullReporter));

    let err = launcher.start().await.unwrap_err();
    assert!(
        matches!(err, LaunchError::AlreadyRunning { .. }),
        "expected already-running, got: {err}"
    );
    assert!(!launcher.was_launched());
    assert!(launcher.handle().is_none());
}

#[tokio::test]
async fn test_already_running_can_be_skipped() {
    init_tracing();
    let addr = spawn_status_server(200).await;
    let mut launcher = WebAppLauncher::new(testexe())
        .application_url(format!("http://{addr}/"))
        .fail_if_already_running(false)
        .probe(fast_probe())
        .reporter(Box::new(NullReporter));

    launcher.start().await.unwrap();
    assert!(!launcher.was_launched());
    assert!(!launcher.is_running());
    assert!(matches!(
        launcher.terminate().unwrap_err(),
        LaunchError::NotStarted { .. }
    ));
}

#[tokio::test]
async fn test_process_death_is_not_reported_as_timeout() {
    init_tracing();
    let port = free_port().await;
    let spec = testexe().args(["--run-ms", "200", "--exit-code", "5"]);
    let mut launcher = WebAppLauncher::new(spec)
        .application_url(format!("http://127.0.0.1:{port}/"))
        .timeout(Duration::from_secs(30))
        .poll_interval(Duration::from_millis(100))
        .probe(fast_probe())
        .reporter(Box::new(NullReporter));

    let started = Instant::now();
    let err = launcher.start().await.unwrap_err();

    assert!(
        matches!(err, LaunchError::TerminatedBeforeReady { .. }),
        "expected terminated-before-ready, got: {err}"
    );
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(launcher.was_launched());
}

#[tokio::test]
async fn test_unexpected_status_never_satisfies_readiness() {
    init_tracing();
    let port = free_port().await;
    let spec = testexe().args(["--http-port", &port.to_string(), "--http-status", "503"]);
    let mut launcher = WebAppLauncher::new(spec)
        .application_url(format!("http://127.0.0.1:{port}/"))
        .expected_status(200)
        .timeout(Duration::from_millis(1500))
        .poll_interval(Duration::from_millis(100))
        .probe(ReachabilityProbe::new().with_attempt_timeout(Duration::from_secs(1)))
        .reporter(Box::new(NullReporter));

    let err = launcher.start().await.unwrap_err();
    assert!(
        matches!(err, LaunchError::ReadinessTimeout { .. }),
        "expected readiness timeout, got: {err}"
    );

    assert!(launcher.is_running());
    launcher.terminate().unwrap();
    launcher.wait_for_exit().await.unwrap();
}
