//! Unit tests for subscriber setup and startup logging.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;
use webshell::app::App;
use webshell::logging;
use webshell::services::deep_link::ChannelUrlResolver;
use webshell::services::settings_engine::SettingsEngine;
use webshell::types::settings::{DeepLinkSettings, SdkSettings};

/// Collects formatted log lines in memory.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture<F: FnOnce()>(level: tracing::Level, f: F) -> String {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(level)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.contents()
}

#[test]
fn test_missing_app_key_is_warned() {
    let output = capture(tracing::Level::INFO, || {
        ChannelUrlResolver::from_settings(&DeepLinkSettings::default(), &SdkSettings::default());
    });
    assert!(output.contains("WARN"), "output: {}", output);
    assert!(output.contains("SDK app key is empty"), "output: {}", output);
}

#[test]
fn test_configured_app_key_is_not_warned() {
    let sdk = SdkSettings {
        app_key: "abc".to_string(),
    };
    let output = capture(tracing::Level::INFO, || {
        ChannelUrlResolver::from_settings(&DeepLinkSettings::default(), &sdk);
    });
    assert!(!output.contains("SDK app key is empty"), "output: {}", output);
}

#[test]
fn test_startup_from_default_settings_logs_load_and_key_warning() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json").to_string_lossy().to_string();

    let output = capture(tracing::Level::DEBUG, || {
        let mut engine = SettingsEngine::new(Some(path));
        App::from_engine(&mut engine).unwrap();
    });

    assert!(output.contains("no settings file, using defaults"), "output: {}", output);
    assert!(output.contains("SDK app key is empty"), "output: {}", output);
}

#[test]
fn test_global_subscriber_installs_once() {
    let handle = logging::init("debug").expect("first install succeeds");
    assert!(logging::init("info").is_none());
    assert!(handle.apply_level("debug"));
}
