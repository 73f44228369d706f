//! "Press back twice to exit" flag.
//!
//! The flag is deadline based: it is considered cleared once the window has
//! elapsed, so no clearing callback has to be scheduled or cancelled.

use std::time::{Duration, Instant};

/// What a back-press at the navigation root decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    /// First press: the flag is now armed and the user should be told.
    Armed,
    /// Second press inside the window: terminate.
    Exit,
}

#[derive(Debug)]
pub struct ExitConfirmation {
    window: Duration,
    armed_at: Option<Instant>,
}

impl ExitConfirmation {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed_at: None,
        }
    }

    pub fn press(&mut self, now: Instant) -> ExitDecision {
        if self.is_armed(now) {
            self.armed_at = None;
            ExitDecision::Exit
        } else {
            self.armed_at = Some(now);
            ExitDecision::Armed
        }
    }

    /// True while a previous press is younger than the window.
    pub fn is_armed(&self, now: Instant) -> bool {
        match self.armed_at {
            Some(at) => now.saturating_duration_since(at) < self.window,
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.armed_at = None;
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
