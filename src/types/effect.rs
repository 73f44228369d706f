use std::time::Duration;

/// Identifies one arming of the retry timer. Expiries carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTicket(pub u64);

/// Kinds of transient notices the host can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    NetworkUnavailable,
    NetworkRecovered,
    NavigatedBack,
    PressBackAgainToExit,
    DeepLinkFailed,
}

/// A toast-style notice with its resolved text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Side effects requested by the controllers. The UI layer executes them in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadUrl(String),
    ShowProgress { label: String },
    HideProgress,
    ShowNotice(Notice),
    ArmRetryTimer { ticket: TimerTicket, after: Duration },
    CancelRetryTimer,
    GoBack,
    ResolveChannel { channel_id: String },
    OpenExternal(String),
    Exit,
}

impl Effect {
    /// Returns the notice kind if this effect shows a notice.
    pub fn notice_kind(&self) -> Option<NoticeKind> {
        match self {
            Effect::ShowNotice(notice) => Some(notice.kind),
            _ => None,
        }
    }
}
