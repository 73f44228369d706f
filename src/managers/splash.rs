//! Splash controller: a static screen shown for a fixed duration before the
//! page host takes over.

use std::time::{Duration, Instant};

/// Result of a splash timer expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashOutcome {
    /// Hand control to the page host. Returned exactly once.
    HandOff,
    /// The splash already handed off; ignore the expiry.
    AlreadyFinished,
}

pub struct SplashController {
    duration: Duration,
    started_at: Option<Instant>,
    finished: bool,
}

impl SplashController {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
            finished: false,
        }
    }

    /// Records the start time and returns the delay after which `on_elapsed` is due.
    pub fn start(&mut self, now: Instant) -> Duration {
        self.started_at = Some(now);
        tracing::debug!(duration_ms = self.duration.as_millis() as u64, "splash shown");
        self.duration
    }

    pub fn on_elapsed(&mut self, now: Instant) -> SplashOutcome {
        if self.finished {
            return SplashOutcome::AlreadyFinished;
        }
        self.finished = true;
        tracing::info!(
            elapsed_ms = self.elapsed_since_start(now).as_millis() as u64,
            "splash finished, handing off to page host"
        );
        SplashOutcome::HandOff
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn elapsed_since_start(&self, now: Instant) -> Duration {
        self.started_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or_default()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
