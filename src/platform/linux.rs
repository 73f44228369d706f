// WebShell platform integration for Linux
// Config: ~/.config/webshell
// Data:   ~/.local/share/webshell
// Transports are read from /sys/class/net.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::connectivity::Transport;
use crate::types::errors::PlatformError;

const SYSFS_NET: &str = "/sys/class/net";

/// Returns the configuration directory for WebShell on Linux.
/// Uses `$XDG_CONFIG_HOME/webshell` if set, otherwise `~/.config/webshell`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("webshell")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("webshell")
    }
}

/// Returns the data directory for WebShell on Linux.
/// Uses `$XDG_DATA_HOME/webshell` if set, otherwise `~/.local/share/webshell`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("webshell")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("webshell")
    }
}

pub fn active_transports() -> Vec<Transport> {
    match scan_interfaces(Path::new(SYSFS_NET)) {
        Ok(transports) => transports,
        Err(e) => {
            tracing::warn!(error = %e, "failed to enumerate network interfaces");
            Vec::new()
        }
    }
}

pub fn open_external(url: &str) -> Result<(), PlatformError> {
    super::spawn_opener("xdg-open", &[url])
}

/// Classifies every interface under `root` that is operationally up.
fn scan_interfaces(root: &Path) -> Result<Vec<Transport>, PlatformError> {
    let entries = fs::read_dir(root).map_err(|e| PlatformError::IoError(e.to_string()))?;
    let mut transports = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name == "lo" {
            continue;
        }
        let dir = entry.path();
        if !is_up(&dir) {
            continue;
        }
        transports.push(classify(&name, &dir));
    }
    Ok(transports)
}

fn is_up(dir: &Path) -> bool {
    match read_trimmed(&dir.join("operstate")).as_deref() {
        Some("up") => true,
        // ppp and some modem drivers never report "up"; fall back to carrier.
        Some("unknown") => read_trimmed(&dir.join("carrier")).as_deref() == Some("1"),
        _ => false,
    }
}

fn classify(name: &str, dir: &Path) -> Transport {
    if dir.join("wireless").exists() || dir.join("phy80211").exists() {
        return Transport::Wifi;
    }
    let devtype = read_trimmed(&dir.join("uevent"))
        .and_then(|uevent| {
            uevent
                .lines()
                .find_map(|l| l.strip_prefix("DEVTYPE=").map(str::to_string))
        })
        .unwrap_or_default();
    if devtype == "wwan" || name.starts_with("wwan") || name.starts_with("ppp") {
        return Transport::Cellular;
    }
    if devtype == "wlan" {
        return Transport::Wifi;
    }
    // Virtual interfaces (bridges, veth, tun) have no backing device.
    if dir.join("device").exists() {
        Transport::Ethernet
    } else {
        Transport::Other
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}
