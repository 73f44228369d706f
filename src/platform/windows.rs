// WebShell platform integration for Windows
// Config: %APPDATA%/WebShell
// Data:   %LOCALAPPDATA%/WebShell
// Transports come from `netsh` (WLAN and mobile broadband) plus a routing check.

use std::env;
use std::net::UdpSocket;
use std::path::PathBuf;
use std::process::Command;

use crate::types::connectivity::Transport;
use crate::types::errors::PlatformError;

/// `%APPDATA%/WebShell`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("WebShell")
}

/// `%LOCALAPPDATA%/WebShell`
pub fn get_data_dir() -> PathBuf {
    let local_appdata = env::var("LOCALAPPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local"));
    PathBuf::from(local_appdata).join("WebShell")
}

pub fn active_transports() -> Vec<Transport> {
    let mut transports = Vec::new();
    if netsh_reports_connected(&["wlan", "show", "interfaces"]) {
        transports.push(Transport::Wifi);
    }
    if netsh_reports_connected(&["mbn", "show", "interfaces"]) {
        transports.push(Transport::Cellular);
    }
    // Anything else with a default route is treated as wired.
    if transports.is_empty() && has_default_route() {
        transports.push(Transport::Ethernet);
    }
    transports
}

pub fn open_external(url: &str) -> Result<(), PlatformError> {
    super::spawn_opener("rundll32", &["url.dll,FileProtocolHandler", url])
}

fn netsh_reports_connected(args: &[&str]) -> bool {
    match Command::new("netsh").args(args).output() {
        Ok(out) if out.status.success() => {
            parse_connected_state(&String::from_utf8_lossy(&out.stdout))
        }
        _ => false,
    }
}

/// Looks for a `State : connected` line in `netsh ... show interfaces` output.
fn parse_connected_state(output: &str) -> bool {
    output.lines().any(|line| {
        let mut parts = line.splitn(2, ':');
        let key = parts.next().unwrap_or("").trim();
        let value = parts.next().unwrap_or("").trim();
        key.eq_ignore_ascii_case("state") && value.eq_ignore_ascii_case("connected")
    })
}

/// Connecting a UDP socket sends nothing but fails without a route.
fn has_default_route() -> bool {
    UdpSocket::bind("0.0.0.0:0")
        .and_then(|s| s.connect("192.0.2.1:9"))
        .is_ok()
}
