//! Browser surface abstraction.
//!
//! The web view only exposes "load", "evaluate script" and page-load signals.
//! Back-history is therefore combined from two sources: documents committed in
//! the surface (`HistoryTracker`) and the same-document entries the page script
//! reports (`PageHistory`). Overlay state that must survive a document change
//! lives in `OverlayState`.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::types::effect::Notice;

/// Operations the controllers need from the embedded browser surface.
pub trait BrowserSurface {
    fn load_url(&mut self, url: &str);
    fn can_go_back(&self) -> bool;
    fn go_back(&mut self);
    fn show_notice(&mut self, notice: &Notice);
    fn set_progress(&mut self, visible: bool, label: &str);
    fn destroy(&mut self);
}

/// Same-document history reported by the page script: entries created by
/// `pushState` or hash changes above the entry the document was loaded into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageHistory {
    pub depth: u32,
}

impl PageHistory {
    pub fn has_entries(&self) -> bool {
        self.depth > 0
    }
}

/// Messages posted by the page script over IPC.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum PageMessage {
    /// A back gesture, with the page's same-document depth at that moment.
    Back {
        #[serde(default)]
        depth: u32,
    },
    /// The page script started in a freshly committed document.
    Ready,
}

impl PageMessage {
    /// Parses an IPC body. Unknown or malformed messages yield `None`.
    pub fn parse(body: &str) -> Option<Self> {
        match serde_json::from_str(body) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring IPC message");
                None
            }
        }
    }
}

/// How a back request is carried out in the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackStep {
    /// Step back inside the current document.
    SameDocument,
    /// Step back to the previously committed document.
    PreviousDocument(String),
    /// Nothing to go back to.
    None,
}

/// In-surface history built from page-finished signals.
#[derive(Debug, Default)]
pub struct HistoryTracker {
    entries: Vec<String>,
    pending_back: bool,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a committed page. A reload of the current entry is not a new entry,
    /// and the page reached by a back step is already on the stack.
    pub fn record(&mut self, url: &str) {
        if self.pending_back {
            self.pending_back = false;
            if self.entries.last().map(String::as_str) == Some(url) {
                return;
            }
        }
        if self.entries.last().map(String::as_str) != Some(url) {
            self.entries.push(url.to_string());
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Pops the current entry. Returns the entry the surface should land on.
    pub fn go_back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.entries.pop();
        self.pending_back = true;
        self.entries.last().map(String::as_str)
    }

    /// Whether the surface can go back, counting same-document entries.
    pub fn can_go_back_with(&self, page: PageHistory) -> bool {
        page.has_entries() || self.can_go_back()
    }

    /// Decides how to go back. Same-document entries are consumed first and
    /// leave the document stack untouched.
    pub fn step_back(&mut self, page: PageHistory) -> BackStep {
        if page.has_entries() {
            return BackStep::SameDocument;
        }
        match self.go_back() {
            Some(url) => BackStep::PreviousDocument(url.to_string()),
            None => BackStep::None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.pending_back = false;
    }
}

/// Overlay state the shell re-applies when a new document commits.
#[derive(Debug, Default)]
pub struct OverlayState {
    progress_label: Option<String>,
    last_notice: Option<(String, Instant)>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_progress(&mut self, visible: bool, label: &str) {
        self.progress_label = visible.then(|| label.to_string());
    }

    /// Label of the progress indicator that should be showing, if any.
    pub fn progress(&self) -> Option<&str> {
        self.progress_label.as_deref()
    }

    pub fn record_notice(&mut self, notice: &Notice, now: Instant) {
        self.last_notice = Some((notice.message.clone(), now));
    }

    /// The last notice if it was shown less than `window` ago.
    pub fn notice_to_replay(&self, now: Instant, window: Duration) -> Option<&str> {
        match &self.last_notice {
            Some((message, shown_at)) if now.saturating_duration_since(*shown_at) < window => {
                Some(message)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.progress_label = None;
        self.last_notice = None;
    }
}
