//! Unit tests for the page host connectivity/load state machine.

use std::time::{Duration, Instant};

use webshell::managers::page_host::{PageHost, PageHostTrait};
use webshell::services::connectivity_probe::ScriptedProbe;
use webshell::types::effect::{Effect, NoticeKind, TimerTicket};
use webshell::types::errors::{DeepLinkError, PlatformError};
use webshell::types::load::HostState;
use webshell::types::settings::ShellSettings;

const TARGET: &str = "https://example.com";

fn host(answers: Vec<bool>) -> PageHost {
    PageHost::new(&ShellSettings::default(), Box::new(ScriptedProbe::new(answers)))
}

fn notices(effects: &[Effect]) -> Vec<NoticeKind> {
    effects.iter().filter_map(Effect::notice_kind).collect()
}

fn armed_ticket(effects: &[Effect]) -> Option<TimerTicket> {
    effects.iter().find_map(|e| match e {
        Effect::ArmRetryTimer { ticket, .. } => Some(*ticket),
        _ => None,
    })
}

#[test]
fn test_initial_state_is_checking() {
    let host = host(vec![true]);
    assert_eq!(host.state(), HostState::Checking);
    assert!(host.load_session().is_none());
}

#[test]
fn test_start_online_loads_target_with_progress() {
    let mut host = host(vec![true]);
    let now = Instant::now();

    let effects = host.start(now);

    assert_eq!(
        effects,
        vec![
            Effect::ShowProgress { label: "Loading...".to_string() },
            Effect::LoadUrl(TARGET.to_string()),
        ]
    );
    assert_eq!(host.state(), HostState::Loading);
    let session = host.load_session().unwrap();
    assert_eq!(session.url, TARGET);
    assert_eq!(session.started_at, now);
    assert!(!host.retry_timer().is_pending());
}

#[test]
fn test_start_offline_shows_notice_and_arms_retry() {
    let mut host = host(vec![false]);

    let effects = host.start(Instant::now());

    assert_eq!(notices(&effects), vec![NoticeKind::NetworkUnavailable]);
    assert!(effects.contains(&Effect::ArmRetryTimer {
        ticket: TimerTicket(1),
        after: Duration::from_millis(15000),
    }));
    assert!(!effects.iter().any(|e| matches!(e, Effect::LoadUrl(_))));
    assert_eq!(host.state(), HostState::OfflineWaiting);
    assert!(host.retry_timer().is_pending());
}

#[test]
fn test_start_is_idempotent() {
    let mut host = host(vec![true]);
    let now = Instant::now();
    host.start(now);
    assert!(host.start(now).is_empty());
}

#[test]
fn test_offline_then_recovered_scenario() {
    let mut host = host(vec![false, true]);
    let t0 = Instant::now();

    let first = host.start(t0);
    assert_eq!(notices(&first), vec![NoticeKind::NetworkUnavailable]);
    let ticket = armed_ticket(&first).unwrap();

    let second = host.on_retry_timer(ticket, t0 + Duration::from_millis(15000));
    assert_eq!(notices(&second), vec![NoticeKind::NetworkRecovered]);
    assert!(second.contains(&Effect::LoadUrl(TARGET.to_string())));
    assert_eq!(host.state(), HostState::Loading);
    assert!(!host.retry_timer().is_pending());
}

#[test]
fn test_repeated_failures_rearm_silently() {
    let mut host = host(vec![false, false, false, false]);
    let t0 = Instant::now();

    let mut ticket = armed_ticket(&host.start(t0)).unwrap();
    for attempt in 1..=3u64 {
        let effects = host.on_retry_timer(ticket, t0 + Duration::from_millis(15000 * attempt));
        assert!(notices(&effects).is_empty());
        ticket = armed_ticket(&effects).expect("timer re-armed");
        assert_eq!(host.state(), HostState::OfflineWaiting);
    }
    assert_eq!(host.retry_timer().armed_count(), 4);
    assert_eq!(host.retry_timer().interval(), Duration::from_millis(15000));
}

#[test]
fn test_stale_retry_ticket_is_ignored() {
    let mut host = host(vec![false, false, true]);
    let t0 = Instant::now();

    let first = armed_ticket(&host.start(t0)).unwrap();
    let second = armed_ticket(&host.on_retry_timer(first, t0)).unwrap();
    assert_ne!(first, second);

    assert!(host.on_retry_timer(first, t0).is_empty());
    assert_eq!(host.state(), HostState::OfflineWaiting);
}

#[test]
fn test_page_finished_hides_progress() {
    let mut host = host(vec![true]);
    let t0 = Instant::now();
    host.start(t0);

    let started = host.on_page_started(TARGET, t0 + Duration::from_millis(5));
    assert_eq!(started, vec![Effect::ShowProgress { label: "Loading...".to_string() }]);
    assert_eq!(host.load_session().unwrap().started_at, t0);

    let finished = host.on_page_finished(TARGET, t0 + Duration::from_millis(700));
    assert_eq!(finished, vec![Effect::HideProgress]);
    assert_eq!(host.state(), HostState::Loaded);
    assert!(!host.load_session().unwrap().progress_visible);
}

#[test]
fn test_surface_navigation_starts_a_new_session() {
    let mut host = host(vec![true]);
    let t0 = Instant::now();
    host.start(t0);
    host.on_page_finished(TARGET, t0);
    let first_id = host.load_session().unwrap().id.clone();

    let later = t0 + Duration::from_secs(4);
    host.on_page_started("https://example.com/menu", later);

    let session = host.load_session().unwrap();
    assert_ne!(session.id, first_id);
    assert_eq!(session.url, "https://example.com/menu");
    assert_eq!(session.started_at, later);
    assert_eq!(host.state(), HostState::Loading);
}

#[test]
fn test_page_start_while_offline_cancels_retry() {
    let mut host = host(vec![false]);
    let t0 = Instant::now();
    host.start(t0);

    let effects = host.on_page_started("https://example.com/cached", t0);

    assert_eq!(effects[0], Effect::CancelRetryTimer);
    assert_eq!(host.state(), HostState::Loading);
    assert!(!host.retry_timer().is_pending());
}

#[test]
fn test_page_finished_without_session_is_ignored() {
    let mut host = host(vec![false]);
    host.start(Instant::now());
    assert!(host.on_page_finished(TARGET, Instant::now()).is_empty());
    assert_eq!(host.state(), HostState::OfflineWaiting);
}

#[test]
fn test_marker_navigation_is_suppressed() {
    let mut host = host(vec![true]);
    host.start(Instant::now());

    let decision = host.on_navigation_request("https://example.com/talk/_jiZPj/chat");
    assert!(decision.suppressed);
    assert_eq!(
        decision.effects,
        vec![Effect::ResolveChannel { channel_id: "_jiZPj".to_string() }]
    );

    let plain = host.on_navigation_request("https://example.com/talk/_jizpj/chat");
    assert!(!plain.suppressed);
    assert!(plain.effects.is_empty());
}

#[test]
fn test_channel_resolution_opens_external_url() {
    let mut host = host(vec![true]);
    let url = "https://pf.kakao.com/_jiZPj/friend?app_key=k&api_ver=1.0".to_string();
    assert_eq!(
        host.on_channel_resolved(Ok(url.clone())),
        vec![Effect::OpenExternal(url)]
    );
}

#[test]
fn test_channel_resolution_failure_is_surfaced() {
    let mut host = host(vec![true]);
    let effects = host.on_channel_resolved(Err(DeepLinkError::MissingAppKey));
    assert_eq!(notices(&effects), vec![NoticeKind::DeepLinkFailed]);

    let effects = host.on_external_open_failed(&PlatformError::OpenFailed("exit 4".to_string()));
    assert_eq!(notices(&effects), vec![NoticeKind::DeepLinkFailed]);
}

#[test]
fn test_destroy_cancels_pending_retry_once() {
    let mut host = host(vec![false]);
    let t0 = Instant::now();
    let ticket = armed_ticket(&host.start(t0)).unwrap();

    assert_eq!(host.destroy(), vec![Effect::CancelRetryTimer]);
    assert!(host.is_destroyed());
    assert!(host.load_session().is_none());
    assert!(host.destroy().is_empty());

    assert!(host.on_retry_timer(ticket, t0 + Duration::from_secs(15)).is_empty());
    assert!(host.on_page_started(TARGET, t0).is_empty());
    assert!(host.on_navigation_request(TARGET).suppressed);
}

#[test]
fn test_notice_text_comes_from_settings() {
    let mut settings = ShellSettings::default();
    settings.notices.network_unavailable = "오프라인".to_string();
    let mut host = PageHost::new(&settings, Box::new(ScriptedProbe::new(vec![false])));

    let effects = host.start(Instant::now());
    let message = effects.iter().find_map(|e| match e {
        Effect::ShowNotice(n) => Some(n.message.clone()),
        _ => None,
    });
    assert_eq!(message.as_deref(), Some("오프라인"));
}
