//! WebShell: a minimal native shell around a single hosted web page.
//!
//! Entry point: opens the shell window and shows the splash screen.
//! When built without the `gui` feature, runs a scripted console demo.

#[cfg(feature = "gui")]
fn main() {
    if let Err(e) = webshell::ui::shell_app::run() {
        webshell::logging::init("info");
        tracing::error!(error = %e, "webshell failed to start");
        eprintln!("webshell: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    webshell::logging::init("warn");

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               WebShell v{} — Demo Mode               ║", env!("CARGO_PKG_VERSION"));
    println!("║        Splash, offline retry, deep links, back policy        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_settings();
    demo_connectivity();
    demo_offline_recovery();
    demo_deep_link();
    demo_back_policy();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All components demonstrated successfully!");
    println!("═══════════════════════════════════════════════════════════════");
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
fn print_effects(label: &str, effects: &[webshell::types::effect::Effect]) {
    println!("  {}:", label);
    if effects.is_empty() {
        println!("    (no effects)");
    }
    for effect in effects {
        println!("    → {:?}", effect);
    }
}

#[cfg(not(feature = "gui"))]
fn demo_app(answers: Vec<bool>) -> webshell::app::App {
    use std::sync::Arc;
    use webshell::app::App;
    use webshell::services::connectivity_probe::ScriptedProbe;
    use webshell::services::deep_link::ChannelUrlResolver;
    use webshell::types::settings::ShellSettings;

    let mut settings = ShellSettings::default();
    settings.sdk.app_key = "demo-app-key".to_string();
    let resolver = ChannelUrlResolver::from_settings(&settings.deep_link, &settings.sdk);
    App::new(settings, Box::new(ScriptedProbe::new(answers)), Arc::new(resolver))
}

#[cfg(not(feature = "gui"))]
fn demo_settings() {
    use webshell::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
    section("Settings Engine");

    let dir = std::env::temp_dir().join(format!("webshell-demo-{}", std::process::id()));
    let path = dir.join("settings.json").to_string_lossy().to_string();
    let mut engine = SettingsEngine::new(Some(path.clone()));
    match engine.load() {
        Ok(settings) => println!("  Target URL: {}", settings.general.target_url),
        Err(e) => println!("  Load failed: {}", e),
    }

    match engine.set_value("timing.retry_interval_ms", serde_json::json!(5000)) {
        Ok(()) => println!(
            "  Retry interval updated to {:?}",
            engine.get_settings().timing.retry_interval()
        ),
        Err(e) => println!("  Update failed: {}", e),
    }
    if let Err(e) = engine.set_value("timing.splash_ms", serde_json::json!(0)) {
        println!("  Rejected zero splash: {}", e);
    }

    let _ = std::fs::remove_dir_all(&dir);
    println!("  ✓ Settings OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_connectivity() {
    use webshell::services::connectivity_probe::{ConnectivityProbe, SystemProbe};
    use webshell::types::settings::ShellSettings;
    section("Connectivity Probe");

    let settings = ShellSettings::default();
    let probe = SystemProbe::new(settings.connectivity.recognized_transports.clone());
    let report = probe.probe();
    println!("  Active transports: {:?}", report.active);
    println!("  Network available: {}", report.available);
    println!("  ✓ Probe OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_offline_recovery() {
    use std::time::{Duration, Instant};
    use webshell::managers::page_host::PageHostTrait;
    use webshell::types::effect::Effect;
    section("Splash → Offline → Recovery");

    let mut app = demo_app(vec![false, false, true]);
    let t0 = Instant::now();
    let splash = app.startup(t0);
    println!("  Splash shown for {:?}", splash);

    let effects = app.on_splash_elapsed(t0 + splash);
    print_effects("Hand-off (offline)", &effects);

    let mut now = t0 + splash;
    let mut pending = effects.iter().find_map(|e| match e {
        Effect::ArmRetryTimer { ticket, after } => Some((*ticket, *after)),
        _ => None,
    });
    while let Some((ticket, after)) = pending {
        now += after;
        let effects = app.host.on_retry_timer(ticket, now);
        print_effects("Retry expired", &effects);
        pending = effects.iter().find_map(|e| match e {
            Effect::ArmRetryTimer { ticket, after } => Some((*ticket, *after)),
            _ => None,
        });
    }

    let target = app.host.target_url().to_string();
    print_effects("Page started", &app.host.on_page_started(&target, now));
    print_effects(
        "Page finished",
        &app.host.on_page_finished(&target, now + Duration::from_millis(420)),
    );
    println!("  Host state: {:?}", app.host.state());
    println!("  ✓ Retry loop OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_deep_link() {
    use std::time::Instant;
    use webshell::managers::page_host::PageHostTrait;
    use webshell::services::deep_link::ChannelResolver;
    use webshell::types::effect::Effect;
    section("Deep-Link Interception");

    let mut app = demo_app(vec![true]);
    let now = Instant::now();
    let splash = app.startup(now);
    app.on_splash_elapsed(now + splash);

    let plain = app.host.on_navigation_request("https://example.com/menu");
    println!("  /menu suppressed: {}", plain.suppressed);

    let link = app.host.on_navigation_request("https://example.com/chat/_jiZPj");
    println!("  chat link suppressed: {}", link.suppressed);
    for effect in link.effects {
        if let Effect::ResolveChannel { channel_id } = effect {
            let result = app.resolver.resolve(&channel_id);
            print_effects("Channel resolved", &app.host.on_channel_resolved(result));
        }
    }
    println!("  ✓ Deep link OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_back_policy() {
    use std::time::{Duration, Instant};
    use webshell::managers::page_host::PageHostTrait;
    section("Back Navigation & Exit Confirmation");

    let mut app = demo_app(vec![true]);
    let now = Instant::now();
    let splash = app.startup(now);
    app.on_splash_elapsed(now + splash);

    print_effects("Back with history", &app.host.on_back_requested(true, now));
    print_effects("Back at root", &app.host.on_back_requested(false, now));
    print_effects(
        "Back again within window",
        &app.host.on_back_requested(false, now + Duration::from_millis(800)),
    );
    print_effects("Shutdown", &app.shutdown());
    println!("  Phase: {:?}", app.phase());
    println!("  ✓ Back policy OK");
    println!();
}
