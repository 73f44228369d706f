//! Page host controller.
//!
//! Owns the connectivity/load state machine, the deep-link interception rule
//! and the back-navigation policy for the single hosted page.
//!
//! ```text
//! Checking ──available──▶ Loading ──page finished──▶ Loaded
//!    │                       ▲
//!    └─unavailable─▶ OfflineWaiting ──retry, available──┘
//!                      │    ▲
//!                      └────┘ retry, still unavailable (silent re-arm)
//! ```
//!
//! A page-started signal from the surface moves any state to `Loading`.

use std::time::Instant;

use crate::managers::exit_confirmation::{ExitConfirmation, ExitDecision};
use crate::managers::retry_timer::RetryTimer;
use crate::services::connectivity_probe::ConnectivityProbe;
use crate::services::deep_link::DeepLinkInterceptor;
use crate::types::effect::{Effect, Notice, NoticeKind, TimerTicket};
use crate::types::errors::{DeepLinkError, PlatformError};
use crate::types::load::{HostState, LoadSession};
use crate::types::settings::{NoticeText, ShellSettings};

/// Answer to a pre-navigation check from the browser surface.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationDecision {
    /// `true` when the surface must not navigate.
    pub suppressed: bool,
    pub effects: Vec<Effect>,
}

impl NavigationDecision {
    fn allow() -> Self {
        Self {
            suppressed: false,
            effects: Vec::new(),
        }
    }

    fn suppress(effects: Vec<Effect>) -> Self {
        Self {
            suppressed: true,
            effects,
        }
    }
}

/// Trait defining the page host interface.
pub trait PageHostTrait {
    fn start(&mut self, now: Instant) -> Vec<Effect>;
    fn on_retry_timer(&mut self, ticket: TimerTicket, now: Instant) -> Vec<Effect>;
    fn on_page_started(&mut self, url: &str, now: Instant) -> Vec<Effect>;
    fn on_page_finished(&mut self, url: &str, now: Instant) -> Vec<Effect>;
    fn on_navigation_request(&mut self, url: &str) -> NavigationDecision;
    fn on_channel_resolved(&mut self, result: Result<String, DeepLinkError>) -> Vec<Effect>;
    fn on_external_open_failed(&mut self, error: &PlatformError) -> Vec<Effect>;
    fn on_back_requested(&mut self, can_go_back: bool, now: Instant) -> Vec<Effect>;
    fn destroy(&mut self) -> Vec<Effect>;
    fn state(&self) -> HostState;
    fn load_session(&self) -> Option<&LoadSession>;
    fn is_destroyed(&self) -> bool;
}

pub struct PageHost {
    target_url: String,
    progress_label: String,
    notices: NoticeText,
    probe: Box<dyn ConnectivityProbe>,
    interceptor: DeepLinkInterceptor,
    retry: RetryTimer,
    exit: ExitConfirmation,
    state: HostState,
    session: Option<LoadSession>,
    offline_notice_shown: bool,
    started: bool,
    destroyed: bool,
}

impl PageHost {
    pub fn new(settings: &ShellSettings, probe: Box<dyn ConnectivityProbe>) -> Self {
        Self {
            target_url: settings.general.target_url.clone(),
            progress_label: settings.general.progress_label.clone(),
            notices: settings.notices.clone(),
            probe,
            interceptor: DeepLinkInterceptor::from_settings(&settings.deep_link),
            retry: RetryTimer::new(settings.timing.retry_interval()),
            exit: ExitConfirmation::new(settings.timing.exit_window()),
            state: HostState::Checking,
            session: None,
            offline_notice_shown: false,
            started: false,
            destroyed: false,
        }
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn retry_timer(&self) -> &RetryTimer {
        &self.retry
    }

    pub fn exit_confirmation(&self) -> &ExitConfirmation {
        &self.exit
    }

    pub fn notice(&self, kind: NoticeKind) -> Notice {
        let message = match kind {
            NoticeKind::NetworkUnavailable => &self.notices.network_unavailable,
            NoticeKind::NetworkRecovered => &self.notices.network_recovered,
            NoticeKind::NavigatedBack => &self.notices.navigated_back,
            NoticeKind::PressBackAgainToExit => &self.notices.press_back_again,
            NoticeKind::DeepLinkFailed => &self.notices.deep_link_failed,
        };
        Notice {
            kind,
            message: message.clone(),
        }
    }

    fn transition(&mut self, next: HostState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "host state changed");
        }
        self.state = next;
    }

    /// Leaves the offline episode, if any. Emits `CancelRetryTimer` when a retry was pending.
    fn end_offline_episode(&mut self, effects: &mut Vec<Effect>) {
        if self.retry.cancel() {
            effects.push(Effect::CancelRetryTimer);
        }
        self.offline_notice_shown = false;
    }

    fn begin_load(&mut self, now: Instant, recovered: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.end_offline_episode(&mut effects);
        self.transition(HostState::Loading);

        let session = LoadSession::new(&self.target_url, now);
        tracing::info!(load_id = %session.id, url = %session.url, "loading target page");
        self.session = Some(session);

        effects.push(Effect::ShowProgress {
            label: self.progress_label.clone(),
        });
        effects.push(Effect::LoadUrl(self.target_url.clone()));
        if recovered {
            effects.push(Effect::ShowNotice(self.notice(NoticeKind::NetworkRecovered)));
        }
        effects
    }

    fn wait_offline(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.transition(HostState::OfflineWaiting);
        if !self.offline_notice_shown {
            self.offline_notice_shown = true;
            effects.push(Effect::ShowNotice(self.notice(NoticeKind::NetworkUnavailable)));
        }
        let ticket = self.retry.arm();
        tracing::info!(
            retry_in_ms = self.retry.interval().as_millis() as u64,
            attempt = self.retry.armed_count(),
            "network unavailable, retry scheduled"
        );
        effects.push(Effect::ArmRetryTimer {
            ticket,
            after: self.retry.interval(),
        });
        effects
    }
}

impl PageHostTrait for PageHost {
    /// Runs the first connectivity probe. Only the first call has an effect.
    fn start(&mut self, now: Instant) -> Vec<Effect> {
        if self.destroyed || self.started {
            return Vec::new();
        }
        self.started = true;

        if self.probe.is_available() {
            self.begin_load(now, false)
        } else {
            self.wait_offline()
        }
    }

    fn on_retry_timer(&mut self, ticket: TimerTicket, now: Instant) -> Vec<Effect> {
        if self.destroyed {
            return Vec::new();
        }
        if !self.retry.fire(ticket) {
            tracing::debug!(ticket = ticket.0, "ignoring stale retry expiry");
            return Vec::new();
        }
        if self.state != HostState::OfflineWaiting {
            return Vec::new();
        }

        if self.probe.is_available() {
            tracing::info!("network recovered");
            self.begin_load(now, true)
        } else {
            self.wait_offline()
        }
    }

    /// Any state moves to `Loading`. There is no guard against a load that is
    /// still in flight; the new session replaces it.
    fn on_page_started(&mut self, url: &str, now: Instant) -> Vec<Effect> {
        if self.destroyed {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if self.state == HostState::OfflineWaiting {
            self.end_offline_episode(&mut effects);
        }

        // The start signal for the load we commanded keeps its original timestamp.
        let continues_command = self.state == HostState::Loading
            && self.session.as_ref().map(|s| s.url == url).unwrap_or(false);
        if !continues_command {
            let session = LoadSession::new(url, now);
            tracing::info!(load_id = %session.id, url, "page load started");
            self.session = Some(session);
        } else if let Some(session) = self.session.as_mut() {
            session.progress_visible = true;
        }

        self.transition(HostState::Loading);
        effects.push(Effect::ShowProgress {
            label: self.progress_label.clone(),
        });
        effects
    }

    fn on_page_finished(&mut self, url: &str, now: Instant) -> Vec<Effect> {
        if self.destroyed {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(url, "page finished without a load session");
            return Vec::new();
        };
        session.progress_visible = false;
        tracing::info!(
            load_id = %session.id,
            url,
            elapsed_ms = session.elapsed(now).as_millis() as u64,
            "page load finished"
        );
        self.transition(HostState::Loaded);
        vec![Effect::HideProgress]
    }

    fn on_navigation_request(&mut self, url: &str) -> NavigationDecision {
        tracing::debug!(url, "navigation requested");
        if self.destroyed {
            return NavigationDecision::suppress(Vec::new());
        }
        match self.interceptor.intercept(url) {
            Some(channel_id) => {
                tracing::info!(url, channel_id, "deep link intercepted");
                NavigationDecision::suppress(vec![Effect::ResolveChannel {
                    channel_id: channel_id.to_string(),
                }])
            }
            None => NavigationDecision::allow(),
        }
    }

    fn on_channel_resolved(&mut self, result: Result<String, DeepLinkError>) -> Vec<Effect> {
        if self.destroyed {
            return Vec::new();
        }
        match result {
            Ok(url) => vec![Effect::OpenExternal(url)],
            Err(e) => {
                tracing::warn!(error = %e, "deep link resolution failed");
                vec![Effect::ShowNotice(self.notice(NoticeKind::DeepLinkFailed))]
            }
        }
    }

    fn on_external_open_failed(&mut self, error: &PlatformError) -> Vec<Effect> {
        if self.destroyed {
            return Vec::new();
        }
        tracing::warn!(error = %error, "external URL hand-off failed");
        vec![Effect::ShowNotice(self.notice(NoticeKind::DeepLinkFailed))]
    }

    fn on_back_requested(&mut self, can_go_back: bool, now: Instant) -> Vec<Effect> {
        if self.destroyed {
            return Vec::new();
        }
        if can_go_back {
            return vec![
                Effect::GoBack,
                Effect::ShowNotice(self.notice(NoticeKind::NavigatedBack)),
            ];
        }
        match self.exit.press(now) {
            ExitDecision::Armed => {
                vec![Effect::ShowNotice(self.notice(NoticeKind::PressBackAgainToExit))]
            }
            ExitDecision::Exit => {
                tracing::info!("exit confirmed");
                vec![Effect::Exit]
            }
        }
    }

    fn destroy(&mut self) -> Vec<Effect> {
        if self.destroyed {
            return Vec::new();
        }
        self.destroyed = true;
        self.session = None;
        self.exit.clear();
        tracing::debug!("page host destroyed");
        if self.retry.cancel() {
            vec![Effect::CancelRetryTimer]
        } else {
            Vec::new()
        }
    }

    fn state(&self) -> HostState {
        self.state
    }

    fn load_session(&self) -> Option<&LoadSession> {
        self.session.as_ref()
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
