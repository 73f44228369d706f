//! Retry timer bookkeeping for the offline polling loop.
//!
//! The timer itself lives in the UI layer; this struct only decides which
//! expiry is current so that at most one retry is ever pending.

use std::time::Duration;

use crate::types::effect::TimerTicket;

/// Fixed-interval, unbounded retry timer. No backoff, no attempt cap.
#[derive(Debug)]
pub struct RetryTimer {
    interval: Duration,
    generation: u64,
    pending: bool,
    armed_count: u64,
}

impl RetryTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            generation: 0,
            pending: false,
            armed_count: 0,
        }
    }

    /// Arms (or re-arms) the timer. Any previously issued ticket becomes stale.
    pub fn arm(&mut self) -> TimerTicket {
        self.generation += 1;
        self.pending = true;
        self.armed_count += 1;
        TimerTicket(self.generation)
    }

    /// Consumes an expiry. Returns false for stale or already-consumed tickets.
    pub fn fire(&mut self, ticket: TimerTicket) -> bool {
        if self.pending && ticket.0 == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Cancels the pending expiry, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.pending;
        self.pending = false;
        was_pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of times the timer has been armed since construction.
    pub fn armed_count(&self) -> u64 {
        self.armed_count
    }
}
