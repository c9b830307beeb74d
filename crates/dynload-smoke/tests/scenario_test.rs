// Runner behavior against a scripted session
//
// Covers artifact exclusivity, exactly-once session release, bounded
// waits, and exact-text verification.


use std::sync::atomic::Ordering;

use dynload_smoke::{Error, Scenario, run};
use fake_session::{FakeSession, Plan};
use tempfile::TempDir;

fn scenario_in(dir: &TempDir) -> Scenario {
    Scenario {
        success_screenshot: dir.path().join("screenshots/dynamic_loading_result.png"),
        failure_screenshot: dir.path().join("error_screenshot.png"),
        ..Scenario::default()
    }
}

#[tokio::test]
async fn passing_run_writes_only_the_success_artifact() {
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let (session, closes) = FakeSession::new(Plan::passing());

    run(Box::new(session), &scenario)
        .await
        .expect("scenario should pass");

    assert!(scenario.success_screenshot.exists());
    assert!(!scenario.failure_screenshot.exists());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn text_mismatch_fails_without_the_success_artifact() {
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let mut plan = Plan::passing();
    plan.result_text = "Hello World".to_string(); // missing the '!'
    let (session, closes) = FakeSession::new(plan);

    let err = run(Box::new(session), &scenario)
        .await
        .expect_err("text differs");

    match err {
        Error::TextMismatch { expected, actual } => {
            assert_eq!(expected, "Hello World!");
            assert_eq!(actual, "Hello World");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!scenario.success_screenshot.exists());
    assert!(scenario.failure_screenshot.exists());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stuck_loading_indicator_times_out() {
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let mut plan = Plan::passing();
    plan.indicator_hides = false;
    let (session, closes) = FakeSession::new(plan);

    let err = run(Box::new(session), &scenario)
        .await
        .expect_err("indicator never hides");

    match err {
        Error::Timeout { condition, timeout } => {
            assert!(condition.contains("id=loading"), "condition: {condition}");
            assert_eq!(timeout, scenario.wait_timeout);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!scenario.success_screenshot.exists());
    assert!(scenario.failure_screenshot.exists());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_start_button_reports_element_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let mut plan = Plan::passing();
    plan.start_button_present = false;
    let (session, closes) = FakeSession::new(plan);

    let err = run(Box::new(session), &scenario)
        .await
        .expect_err("button is absent");

    assert!(matches!(err, Error::ElementNotFound(_)), "got: {err}");
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unclickable_start_button_reports_not_interactable() {
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let mut plan = Plan::passing();
    plan.start_button_clickable = false;
    let (session, closes) = FakeSession::new(plan);

    let err = run(Box::new(session), &scenario)
        .await
        .expect_err("button is obscured");

    assert!(
        matches!(err, Error::ElementNotInteractable { .. }),
        "got: {err}"
    );
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn navigation_failure_still_releases_the_session() {
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let mut plan = Plan::passing();
    plan.navigation_ok = false;
    let (session, closes) = FakeSession::new(plan);

    let err = run(Box::new(session), &scenario)
        .await
        .expect_err("page unreachable");

    assert!(matches!(err, Error::Navigation { .. }), "got: {err}");
    assert!(scenario.failure_screenshot.exists());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hidden_result_element_fails_the_visibility_check() {
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let mut plan = Plan::passing();
    plan.result_stays_visible = false;
    let (session, closes) = FakeSession::new(plan);

    let err = run(Box::new(session), &scenario)
        .await
        .expect_err("element hidden on re-check");

    assert!(matches!(err, Error::NotVisible(_)), "got: {err}");
    assert!(!scenario.success_screenshot.exists());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_failure_screenshot_does_not_mask_the_original_error() {
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let mut plan = Plan::passing();
    plan.result_text = "Hello World".to_string();
    plan.screenshots_ok = false;
    let (session, closes) = FakeSession::new(plan);

    let err = run(Box::new(session), &scenario)
        .await
        .expect_err("text differs");

    // Still the content mismatch, not the screenshot failure.
    assert!(matches!(err, Error::TextMismatch { .. }), "got: {err}");
    assert!(!scenario.success_screenshot.exists());
    assert!(!scenario.failure_screenshot.exists());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn repeated_runs_yield_the_same_outcome() {
    // Passing plan passes both times.
    for _ in 0..2 {
        let dir = TempDir::new().expect("tempdir");
        let scenario = scenario_in(&dir);
        let (session, closes) = FakeSession::new(Plan::passing());
        run(Box::new(session), &scenario)
            .await
            .expect("scenario should pass");
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    // Mismatching plan fails identically both times.
    for _ in 0..2 {
        let dir = TempDir::new().expect("tempdir");
        let scenario = scenario_in(&dir);
        let mut plan = Plan::passing();
        plan.result_text = "Hello World".to_string();
        let (session, closes) = FakeSession::new(plan);
        let err = run(Box::new(session), &scenario)
            .await
            .expect_err("text differs");
        assert!(matches!(err, Error::TextMismatch { .. }), "got: {err}");
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn every_outcome_leaves_exactly_one_artifact() {
    // Pass: success artifact only.
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let (session, _) = FakeSession::new(Plan::passing());
    run(Box::new(session), &scenario)
        .await
        .expect("scenario should pass");
    assert!(scenario.success_screenshot.exists());
    assert!(!scenario.failure_screenshot.exists());

    // Fail: failure artifact only.
    let dir = TempDir::new().expect("tempdir");
    let scenario = scenario_in(&dir);
    let mut plan = Plan::passing();
    plan.result_appears = false;
    let (session, _) = FakeSession::new(plan);
    run(Box::new(session), &scenario)
        .await
        .expect_err("result never appears");
    assert!(!scenario.success_screenshot.exists());
    assert!(scenario.failure_screenshot.exists());
}
