//! Unit tests for connectivity probing and transport recognition.

use webshell::services::connectivity_probe::{ConnectivityProbe, ScriptedProbe, SystemProbe};
use webshell::types::connectivity::{ProbeReport, Transport};
use webshell::types::settings::ShellSettings;

#[test]
fn test_default_recognized_transports() {
    let settings = ShellSettings::default();
    assert_eq!(
        settings.connectivity.recognized_transports,
        vec![Transport::Wifi, Transport::Cellular, Transport::Ethernet]
    );
}

#[test]
fn test_report_available_only_for_recognized_transport() {
    let recognized = [Transport::Wifi, Transport::Cellular];

    assert!(ProbeReport::from_active(vec![Transport::Cellular], &recognized).available);
    assert!(ProbeReport::from_active(vec![Transport::Other, Transport::Wifi], &recognized).available);
    assert!(!ProbeReport::from_active(vec![Transport::Ethernet], &recognized).available);
    assert!(!ProbeReport::from_active(vec![Transport::Other], &recognized).available);
    assert!(!ProbeReport::from_active(Vec::new(), &recognized).available);
}

#[test]
fn test_report_keeps_active_list() {
    let report = ProbeReport::from_active(vec![Transport::Other], &[Transport::Wifi]);
    assert_eq!(report.active, vec![Transport::Other]);
    assert_eq!(ProbeReport::unavailable().active, Vec::<Transport>::new());
}

#[test]
fn test_transport_serializes_lowercase() {
    let json = serde_json::to_string(&vec![Transport::Wifi, Transport::Cellular]).unwrap();
    assert_eq!(json, r#"["wifi","cellular"]"#);
    let parsed: Transport = serde_json::from_str("\"ethernet\"").unwrap();
    assert_eq!(parsed, Transport::Ethernet);
}

#[test]
fn test_scripted_probe_replays_then_repeats_last() {
    let probe = ScriptedProbe::new(vec![false, true]);
    assert!(!probe.is_available());
    assert!(probe.is_available());
    assert!(probe.is_available());

    probe.push(false);
    assert!(!probe.is_available());
    assert!(!probe.is_available());
}

#[test]
fn test_empty_script_is_unavailable() {
    let probe = ScriptedProbe::new(Vec::new());
    assert_eq!(probe.probe(), ProbeReport::unavailable());
}

#[test]
fn test_system_probe_with_no_recognized_transports_is_unavailable() {
    let probe = SystemProbe::new(Vec::new());
    assert!(probe.recognized().is_empty());
    assert!(!probe.is_available());
}
