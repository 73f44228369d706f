use std::time::{Duration, Instant};

use uuid::Uuid;

/// Host controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Checking,
    Loading,
    Loaded,
    OfflineWaiting,
}

/// One page-load attempt in the browser surface.
#[derive(Debug, Clone)]
pub struct LoadSession {
    pub id: String,
    pub url: String,
    pub started_at: Instant,
    pub progress_visible: bool,
}

impl LoadSession {
    pub fn new(url: &str, started_at: Instant) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            started_at,
            progress_visible: true,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}
