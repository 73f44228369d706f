// WebShell platform abstraction
// Provides platform-specific paths, active network transport enumeration and
// the external URL opener for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

use crate::types::connectivity::Transport;
use crate::types::errors::PlatformError;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for WebShell.
///
/// - **Linux**: `~/.config/webshell` (or `$XDG_CONFIG_HOME/webshell`)
/// - **macOS**: `~/Library/Application Support/WebShell`
/// - **Windows**: `%APPDATA%/WebShell`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for WebShell.
/// The web view keeps its cookies, DOM storage and cache here.
///
/// - **Linux**: `~/.local/share/webshell` (or `$XDG_DATA_HOME/webshell`)
/// - **macOS**: `~/Library/Application Support/WebShell/WebData`
/// - **Windows**: `%LOCALAPPDATA%/WebShell`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Lists the transports of the interfaces that are currently up and routable.
///
/// Returns an empty list when nothing is connected or the OS query fails.
pub fn active_transports() -> Vec<Transport> {
    #[cfg(target_os = "linux")]
    {
        linux::active_transports()
    }
    #[cfg(target_os = "macos")]
    {
        macos::active_transports()
    }
    #[cfg(target_os = "windows")]
    {
        windows::active_transports()
    }
}

/// Hands `url` to the system's default handler (browser or registered app).
///
/// Only absolute http(s) URLs are accepted.
pub fn open_external(url: &str) -> Result<(), PlatformError> {
    if !is_openable_url(url) {
        return Err(PlatformError::InvalidUrl(url.to_string()));
    }

    #[cfg(target_os = "linux")]
    {
        linux::open_external(url)
    }
    #[cfg(target_os = "macos")]
    {
        macos::open_external(url)
    }
    #[cfg(target_os = "windows")]
    {
        windows::open_external(url)
    }
}

fn is_openable_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => !rest.is_empty() && !url.chars().any(|c| c.is_whitespace() || c.is_control()),
        None => false,
    }
}

/// Runs `program` with `args` and maps a non-zero exit into `PlatformError::OpenFailed`.
fn spawn_opener(program: &str, args: &[&str]) -> Result<(), PlatformError> {
    let status = std::process::Command::new(program)
        .args(args)
        .status()
        .map_err(|e| PlatformError::OpenFailed(format!("{}: {}", program, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(PlatformError::OpenFailed(format!(
            "{} exited with {}",
            program, status
        )))
    }
}
