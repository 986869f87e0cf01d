//! End-to-end scenarios for the plain (no readiness wait) launcher.

use e2e_tests::init_tracing;
use spinup_common::NullReporter;
use spinup_launch::AppLauncher;
use spinup_process::LaunchSpec;

const TESTEXE: &str = env!("CARGO_BIN_EXE_testexe");

#[tokio::test]
async fn test_start_returns_immediately_with_running_process() {
    init_tracing();
    let spec = LaunchSpec::new(TESTEXE);
    let mut launcher = AppLauncher::new(spec).reporter(Box::new(NullReporter));

    launcher.start().unwrap();
    assert!(launcher.is_running());

    launcher.terminate().unwrap();
    let summary = launcher.wait_for_exit().await.unwrap();
    assert!(summary.aborted);
}

#[tokio::test]
async fn test_exit_code_is_passed_through() {
    init_tracing();
    let spec = LaunchSpec::new(TESTEXE).args(["--run-ms", "100", "--exit-code", "7"]);
    let mut launcher = AppLauncher::new(spec).reporter(Box::new(NullReporter));

    launcher.start().unwrap();
    let summary = launcher.wait_for_exit().await.unwrap();
    assert_eq!(summary.code, Some(7));
    assert!(!summary.success());
}
