//! Integration tests for the spawn window.
//!
//! Timed tests run on a paused Tokio clock, so sleeping auto-advances
//! time and the window timer fires deterministically.

use std::time::Duration;

use laterjoin_window::{SpawnWindow, WindowError, WindowLength};

// =========================================================================
// Helpers
// =========================================================================

fn window_secs(secs: i64) -> SpawnWindow {
    SpawnWindow::new(WindowLength::from_seconds(secs))
}

// =========================================================================
// WindowLength
// =========================================================================

#[test]
fn test_length_from_positive_seconds() {
    assert_eq!(
        WindowLength::from_seconds(120),
        WindowLength::Timed(Duration::from_secs(120))
    );
}

#[test]
fn test_length_from_negative_seconds_is_unbounded() {
    assert_eq!(WindowLength::from_seconds(-1), WindowLength::Unbounded);
}

// =========================================================================
// Open / close
// =========================================================================

#[test]
fn test_new_window_is_closed() {
    let w = window_secs(120);
    assert!(!w.is_allowed());
    assert!(!w.is_armed());
}

#[test]
fn test_open_then_close() {
    let mut w = window_secs(120);
    w.open();
    assert!(w.is_allowed());
    assert!(w.close());
    assert!(!w.is_allowed());
    // Second close is a no-op.
    assert!(!w.close());
}

#[test]
fn test_arm_outside_runtime_fails() {
    let mut w = window_secs(120);
    w.open();
    assert!(matches!(w.arm(), Err(WindowError::NoRuntime)));
    assert!(w.is_allowed(), "window stays open when arming fails");
}

#[test]
fn test_arm_unbounded_outside_runtime_is_fine() {
    let mut w = window_secs(-1);
    w.open();
    assert!(!w.arm().unwrap());
}

// =========================================================================
// Timer expiry
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_timer_closes_window_after_length() {
    let mut w = window_secs(120);
    w.open();
    assert!(w.arm().unwrap());
    assert!(w.is_armed());

    tokio::time::sleep(Duration::from_secs(119)).await;
    assert!(w.is_allowed(), "still open before deadline");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!w.is_allowed(), "closed after deadline");
    assert!(!w.is_armed());
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_window_never_closes() {
    let mut w = window_secs(-1);
    w.open();
    assert!(!w.arm().unwrap());

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(w.is_allowed());
}

#[tokio::test(start_paused = true)]
async fn test_arm_on_closed_window_does_nothing() {
    let mut w = window_secs(10);
    assert!(!w.arm().unwrap());
    assert!(!w.is_armed());
}

#[tokio::test(start_paused = true)]
async fn test_disarm_prevents_expiry() {
    let mut w = window_secs(10);
    w.open();
    w.arm().unwrap();
    w.disarm();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(w.is_allowed(), "disarmed timer must not fire");
}

#[tokio::test(start_paused = true)]
async fn test_reopen_cancels_previous_round_timer() {
    let mut w = window_secs(10);
    w.open();
    w.arm().unwrap();

    tokio::time::sleep(Duration::from_secs(5)).await;
    w.open();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(w.is_allowed(), "old round's timer must not close the new round");
}

#[tokio::test(start_paused = true)]
async fn test_close_before_expiry_stays_closed() {
    let mut w = window_secs(10);
    w.open();
    w.arm().unwrap();
    assert!(w.close());

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(!w.is_allowed());
}

#[tokio::test(start_paused = true)]
async fn test_expiry_is_one_shot() {
    let mut w = window_secs(1);
    w.open();
    w.arm().unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!w.is_allowed());
    // Nothing reopens it until the next open().
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(!w.is_allowed());
}

// =========================================================================
// Races against a real multi-threaded runtime
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_expiry_racing_reopen_never_leaves_window_closed() {
    for _ in 0..200 {
        let mut w = window_secs(0);
        w.open();
        w.arm().unwrap();
        tokio::task::yield_now().await;
        // Whether the zero-length timer already fired or not, a reopen
        // issued after it must win.
        w.open();
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(w.is_allowed());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_expiry_racing_close_never_reopens() {
    for _ in 0..200 {
        let mut w = window_secs(0);
        w.open();
        w.arm().unwrap();
        w.close();
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(!w.is_allowed());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_expiry_racing_close_then_reopen_leaves_window_open() {
    for _ in 0..200 {
        let mut w = window_secs(0);
        w.open();
        w.arm().unwrap();
        w.close();
        // The closed word differs from the timer's expected word only by
        // the allowed bit; reopening must not recreate it.
        w.open();
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(w.is_allowed());
    }
}
