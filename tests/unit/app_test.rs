//! Unit tests for the App Core splash → host sequencing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use webshell::app::{App, Phase};
use webshell::managers::page_host::PageHostTrait;
use webshell::services::connectivity_probe::ScriptedProbe;
use webshell::services::deep_link::ChannelUrlResolver;
use webshell::services::settings_engine::SettingsEngine;
use webshell::types::effect::{Effect, NoticeKind};
use webshell::types::load::HostState;
use webshell::types::settings::ShellSettings;
use tempfile::TempDir;

fn app(answers: Vec<bool>) -> App {
    let settings = ShellSettings::default();
    let resolver = ChannelUrlResolver::new(&settings.deep_link.resolver_base_url, "key");
    App::new(settings, Box::new(ScriptedProbe::new(answers)), Arc::new(resolver))
}

#[test]
fn test_host_does_not_start_before_splash_elapses() {
    let mut app = app(vec![true]);
    let delay = app.startup(Instant::now());

    assert_eq!(delay, Duration::from_millis(3000));
    assert_eq!(app.phase(), Phase::Splash);
    assert_eq!(app.host.state(), HostState::Checking);
}

#[test]
fn test_splash_hands_off_once() {
    let mut app = app(vec![true]);
    let t0 = Instant::now();
    let delay = app.startup(t0);

    let effects = app.on_splash_elapsed(t0 + delay);
    assert!(effects.contains(&Effect::LoadUrl("https://example.com".to_string())));
    assert_eq!(app.phase(), Phase::Hosting);
    assert!(app.splash.is_finished());

    assert!(app.on_splash_elapsed(t0 + delay * 2).is_empty());
}

#[test]
fn test_offline_hand_off() {
    let mut app = app(vec![false]);
    let t0 = Instant::now();
    let delay = app.startup(t0);

    let effects = app.on_splash_elapsed(t0 + delay);

    assert_eq!(
        effects.iter().filter_map(Effect::notice_kind).collect::<Vec<_>>(),
        vec![NoticeKind::NetworkUnavailable]
    );
    assert_eq!(app.host.state(), HostState::OfflineWaiting);
}

#[test]
fn test_shutdown_tears_down_host() {
    let mut app = app(vec![false]);
    let t0 = Instant::now();
    let delay = app.startup(t0);
    app.on_splash_elapsed(t0 + delay);

    assert_eq!(app.shutdown(), vec![Effect::CancelRetryTimer]);
    assert_eq!(app.phase(), Phase::ShutDown);
    assert!(app.host.is_destroyed());
}

#[test]
fn test_splash_after_shutdown_does_not_start_host() {
    let mut app = app(vec![true]);
    let t0 = Instant::now();
    let delay = app.startup(t0);
    app.shutdown();

    assert!(app.on_splash_elapsed(t0 + delay).is_empty());
    assert_eq!(app.host.state(), HostState::Checking);
}

#[test]
fn test_from_engine_uses_loaded_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "general": { "target_url": "https://m.example.org/" }, "timing": { "splash_ms": 750 } }"#,
    )
    .unwrap();
    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));

    let mut app = App::from_engine(&mut engine).unwrap();

    assert_eq!(app.host.target_url(), "https://m.example.org/");
    assert_eq!(app.startup(Instant::now()), Duration::from_millis(750));
}
