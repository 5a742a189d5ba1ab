use std::sync::{Arc, Mutex};

use super::*;
use crate::error::ErrorCode;

fn registry() -> SimulatorRegistry {
    SimulatorRegistry::new(Revision::new())
}

fn script() -> Vec<Step> {
    vec![
        Step::new("one", Duration::from_millis(100), 30),
        Step::new("two", Duration::from_millis(100), 60),
        Step::new("three", Duration::from_millis(100), 100),
    ]
}

// =============================================================================
// replay
// =============================================================================

#[tokio::test(start_paused = true)]
async fn replay_reports_every_step_in_order() {
    let cancel = CancellationToken::new();
    let mut seen = Vec::new();
    let done = replay(script(), &cancel, |s| seen.push((s.message.clone().unwrap(), s.progress))).await;
    assert!(done);
    assert_eq!(seen, [("one".to_string(), 30), ("two".to_string(), 60), ("three".to_string(), 100)]);
}

#[tokio::test(start_paused = true)]
async fn replay_waits_each_delay() {
    let cancel = CancellationToken::new();
    let start = tokio::time::Instant::now();
    replay(script(), &cancel, |_| {}).await;
    assert_eq!(start.elapsed(), Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_later_steps() {
    let cancel = CancellationToken::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let task = {
        let cancel = cancel.clone();
        let seen = seen.clone();
        tokio::spawn(async move { replay(script(), &cancel, |s| seen.lock().unwrap().push(s.progress)).await })
    };
    tokio::time::sleep(Duration::from_millis(150)).await;
    cancel.cancel();
    assert!(!task.await.unwrap());
    assert_eq!(*seen.lock().unwrap(), [30]);
}

#[tokio::test(start_paused = true)]
async fn pre_cancelled_token_reports_nothing() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut calls = 0;
    assert!(!replay(script(), &cancel, |_| calls += 1).await);
    assert_eq!(calls, 0);
}

// =============================================================================
// registry
// =============================================================================

#[test]
fn start_while_running_is_busy() {
    let reg = registry();
    reg.start(SimulatorKind::Download).unwrap();
    let err = reg.start(SimulatorKind::Download).unwrap_err();
    assert!(matches!(err, SimulatorError::Busy(SimulatorKind::Download)));
    assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);
    // Other kinds are independent.
    assert!(reg.start(SimulatorKind::ZeroKey).is_ok());
}

#[test]
fn finished_run_can_be_restarted() {
    let reg = registry();
    let first = reg.start(SimulatorKind::KeyExtraction).unwrap();
    assert!(reg.finish(&first, RunStatus::Succeeded, None));
    let second = reg.start(SimulatorKind::KeyExtraction).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(reg.get(SimulatorKind::KeyExtraction).unwrap().status, RunStatus::Running);
}

#[test]
fn updates_for_replaced_runs_are_ignored() {
    let reg = registry();
    let old = reg.start(SimulatorKind::Download).unwrap();
    reg.finish(&old, RunStatus::Succeeded, None);
    let new = reg.start(SimulatorKind::Download).unwrap();

    assert!(!reg.apply_step(&old, &Step::silent(Duration::ZERO, 50)));
    assert!(reg.apply_step(&new, &Step::silent(Duration::ZERO, 20)));
    assert_eq!(reg.get(SimulatorKind::Download).unwrap().progress, 20);
}

#[test]
fn cancel_marks_run_and_blocks_updates() {
    let reg = registry();
    let handle = reg.start(SimulatorKind::ZeroKey).unwrap();
    assert!(reg.cancel(SimulatorKind::ZeroKey));
    assert!(handle.cancel.is_cancelled());
    assert!(!reg.apply_step(&handle, &Step::new("late", Duration::ZERO, 90)));
    assert!(!reg.finish(&handle, RunStatus::Succeeded, None));

    let snap = reg.get(SimulatorKind::ZeroKey).unwrap();
    assert_eq!(snap.status, RunStatus::Cancelled);
    assert!(snap.log.is_empty());
    // Nothing left to cancel.
    assert!(!reg.cancel(SimulatorKind::ZeroKey));
}

#[test]
fn all_lists_runs_in_kind_order() {
    let reg = registry();
    reg.start(SimulatorKind::KeyExtraction).unwrap();
    reg.start(SimulatorKind::ZeroKey).unwrap();
    let kinds: Vec<_> = reg.all().into_iter().map(|r| r.kind).collect();
    assert_eq!(kinds, [SimulatorKind::ZeroKey, SimulatorKind::KeyExtraction]);
}

#[test]
fn registry_bumps_revision() {
    let rev = Revision::new();
    let reg = SimulatorRegistry::new(rev.clone());
    let handle = reg.start(SimulatorKind::Download).unwrap();
    reg.apply_step(&handle, &Step::silent(Duration::ZERO, 10));
    assert_eq!(rev.current(), 2);
}

#[tokio::test(start_paused = true)]
async fn run_script_fills_log_and_progress() {
    let reg = registry();
    let handle = reg.start(SimulatorKind::KeyExtraction).unwrap();
    assert!(reg.run_script(&handle, script()).await);
    let snap = reg.get(SimulatorKind::KeyExtraction).unwrap();
    assert_eq!(snap.log, ["one", "two", "three"]);
    assert_eq!(snap.progress, 100);
}

#[tokio::test(start_paused = true)]
async fn run_script_reports_cancellation() {
    let reg = registry();
    let handle = reg.start(SimulatorKind::KeyExtraction).unwrap();
    let task = {
        let reg = reg.clone();
        let handle = handle.clone();
        tokio::spawn(async move { reg.run_script(&handle, script()).await })
    };
    tokio::time::sleep(Duration::from_millis(150)).await;
    reg.cancel(SimulatorKind::KeyExtraction);
    assert!(!task.await.unwrap());
    let snap = reg.get(SimulatorKind::KeyExtraction).unwrap();
    assert_eq!(snap.log, ["one"]);
    assert_eq!(snap.progress, 30);
}

#[test]
fn kind_parses_and_serializes_kebab_case() {
    assert_eq!("key-extraction".parse::<SimulatorKind>().unwrap(), SimulatorKind::KeyExtraction);
    assert!(matches!("warp".parse::<SimulatorKind>(), Err(SimulatorError::UnknownKind(_))));
    assert_eq!(serde_json::to_string(&SimulatorKind::ZeroKey).unwrap(), "\"zero-key\"");
}
