use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::connectivity::Transport;

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ShellSettings {
    pub general: GeneralSettings,
    pub sdk: SdkSettings,
    pub deep_link: DeepLinkSettings,
    pub timing: TimingSettings,
    pub connectivity: ConnectivitySettings,
    pub surface: SurfaceSettings,
    pub notices: NoticeText,
    pub window: WindowSettings,
}

/// What the shell shows and how loudly it logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    /// The single remote page hosted by the shell.
    pub target_url: String,
    /// Label rendered next to the progress indicator.
    pub progress_label: String,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            target_url: "https://example.com".to_string(),
            progress_label: "Loading...".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Third-party chat SDK credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SdkSettings {
    pub app_key: String,
}

/// Deep-link interception rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeepLinkSettings {
    /// Exact, case-sensitive substring that marks a navigation for hand-off.
    pub marker: String,
    /// Chat channel opened when the marker is hit.
    pub channel_id: String,
    pub resolver_base_url: String,
}

impl Default for DeepLinkSettings {
    fn default() -> Self {
        Self {
            marker: "_jiZPj".to_string(),
            channel_id: "_jiZPj".to_string(),
            resolver_base_url: "https://pf.kakao.com".to_string(),
        }
    }
}

/// Fixed durations, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingSettings {
    pub splash_ms: u64,
    pub retry_interval_ms: u64,
    pub exit_window_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            splash_ms: 3000,
            retry_interval_ms: 15000,
            exit_window_ms: 2000,
        }
    }
}

impl TimingSettings {
    pub fn splash(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn exit_window(&self) -> Duration {
        Duration::from_millis(self.exit_window_ms)
    }
}

/// Which transports count as "online".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectivitySettings {
    pub recognized_transports: Vec<Transport>,
}

impl Default for ConnectivitySettings {
    /// Wi-Fi and cellular, plus Ethernet. Desktops are usually wired, and the
    /// Windows probe reports any routable non-wireless adapter as Ethernet, so
    /// leaving it out would keep a wired machine offline forever. Set
    /// `["wifi", "cellular"]` for the strict phone rule.
    fn default() -> Self {
        Self {
            recognized_transports: vec![Transport::Wifi, Transport::Cellular, Transport::Ethernet],
        }
    }
}

/// Flags applied to the embedded web view when it is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Persistent DOM storage, cookies and cache. `false` builds an incognito view.
    pub storage_enabled: bool,
    pub autoplay: bool,
    /// `None` means devtools follow `debug_assertions`.
    pub devtools: Option<bool>,
    pub user_agent: Option<String>,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            storage_enabled: true,
            autoplay: false,
            devtools: None,
            user_agent: None,
        }
    }
}

impl SurfaceSettings {
    pub fn devtools_enabled(&self) -> bool {
        self.devtools.unwrap_or(cfg!(debug_assertions))
    }
}

/// User-visible notice texts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoticeText {
    pub network_unavailable: String,
    pub network_recovered: String,
    pub navigated_back: String,
    pub press_back_again: String,
    pub deep_link_failed: String,
}

impl Default for NoticeText {
    fn default() -> Self {
        Self {
            network_unavailable: "Network is unavailable. Retrying shortly.".to_string(),
            network_recovered: "Network connection restored.".to_string(),
            navigated_back: "Going back to the previous page.".to_string(),
            press_back_again: "Press back again to exit.".to_string(),
            deep_link_failed: "Could not open the chat channel.".to_string(),
        }
    }
}

/// Native window geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "WebShell".to_string(),
            width: 420,
            height: 860,
        }
    }
}
