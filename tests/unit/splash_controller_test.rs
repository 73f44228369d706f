//! Unit tests for the splash controller and its hand-off to the page host.

use std::time::{Duration, Instant};

use webshell::managers::splash::{SplashController, SplashOutcome};

#[test]
fn test_start_returns_configured_duration() {
    let mut splash = SplashController::new(Duration::from_millis(3000));
    assert_eq!(splash.start(Instant::now()), Duration::from_millis(3000));
    assert!(!splash.is_finished());
}

#[test]
fn test_hand_off_happens_exactly_once() {
    let t0 = Instant::now();
    let mut splash = SplashController::new(Duration::from_millis(3000));
    splash.start(t0);

    assert_eq!(
        splash.on_elapsed(t0 + Duration::from_millis(3000)),
        SplashOutcome::HandOff
    );
    assert!(splash.is_finished());
    assert_eq!(
        splash.on_elapsed(t0 + Duration::from_millis(6000)),
        SplashOutcome::AlreadyFinished
    );
}

#[test]
fn test_elapsed_since_start_is_measured_from_start() {
    let t0 = Instant::now();
    let mut splash = SplashController::new(Duration::from_millis(500));
    assert_eq!(splash.elapsed_since_start(t0), Duration::ZERO);

    splash.start(t0);
    assert_eq!(
        splash.elapsed_since_start(t0 + Duration::from_millis(512)),
        Duration::from_millis(512)
    );
}
