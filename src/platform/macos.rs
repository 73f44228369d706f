// WebShell platform integration for macOS
// Config: ~/Library/Application Support/WebShell
// Data:   ~/Library/Application Support/WebShell/WebData
// Transports come from the default route's interface and its hardware port.

use std::env;
use std::path::PathBuf;
use std::process::Command;

use crate::types::connectivity::Transport;
use crate::types::errors::PlatformError;

/// Returns the home directory on macOS.
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Application Support/WebShell`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("WebShell")
}

/// `~/Library/Application Support/WebShell/WebData`
pub fn get_data_dir() -> PathBuf {
    get_config_dir().join("WebData")
}

pub fn active_transports() -> Vec<Transport> {
    let Some(route) = command_output("route", &["-n", "get", "default"]) else {
        return Vec::new();
    };
    let Some(device) = parse_default_interface(&route) else {
        return Vec::new();
    };
    let ports = command_output("networksetup", &["-listallhardwareports"]).unwrap_or_default();
    vec![classify_port(port_for_device(&ports, &device).as_deref())]
}

pub fn open_external(url: &str) -> Result<(), PlatformError> {
    super::spawn_opener("open", &[url])
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    match Command::new(program).args(args).output() {
        Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).to_string()),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(program, error = %e, "network query failed");
            None
        }
    }
}

fn parse_default_interface(route_output: &str) -> Option<String> {
    route_output
        .lines()
        .find_map(|l| l.trim().strip_prefix("interface:"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Finds the "Hardware Port" name listed for `device`.
fn port_for_device(ports_output: &str, device: &str) -> Option<String> {
    let mut current_port: Option<&str> = None;
    for line in ports_output.lines() {
        let line = line.trim();
        if let Some(port) = line.strip_prefix("Hardware Port:") {
            current_port = Some(port.trim());
        } else if let Some(dev) = line.strip_prefix("Device:") {
            if dev.trim() == device {
                return current_port.map(str::to_string);
            }
        }
    }
    None
}

fn classify_port(port: Option<&str>) -> Transport {
    match port {
        Some(p) if p.contains("Wi-Fi") || p.contains("AirPort") => Transport::Wifi,
        Some(p) if p.contains("iPhone") || p.contains("WWAN") => Transport::Cellular,
        Some(p) if p.contains("Ethernet") || p.contains("Thunderbolt") || p.contains("LAN") => {
            Transport::Ethernet
        }
        _ => Transport::Other,
    }
}
