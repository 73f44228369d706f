//! Deep-link interception and chat-channel resolution.
//!
//! Navigation targets containing the configured marker are not rendered; the
//! host resolves the chat channel URL instead and hands it to the system opener.

use crate::types::errors::DeepLinkError;
use crate::types::settings::{DeepLinkSettings, SdkSettings};

/// Exact, case-sensitive substring match on navigation targets.
#[derive(Debug, Clone)]
pub struct DeepLinkInterceptor {
    marker: String,
    channel_id: String,
}

impl DeepLinkInterceptor {
    pub fn new(marker: &str, channel_id: &str) -> Self {
        Self {
            marker: marker.to_string(),
            channel_id: channel_id.to_string(),
        }
    }

    pub fn from_settings(settings: &DeepLinkSettings) -> Self {
        Self::new(&settings.marker, &settings.channel_id)
    }

    /// An empty marker never matches.
    pub fn matches(&self, url: &str) -> bool {
        !self.marker.is_empty() && url.contains(self.marker.as_str())
    }

    /// Returns the channel to resolve when `url` is intercepted.
    pub fn intercept(&self, url: &str) -> Option<&str> {
        if self.matches(url) {
            Some(&self.channel_id)
        } else {
            None
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

/// Trait defining the chat-channel lookup.
pub trait ChannelResolver: Send + Sync {
    fn resolve(&self, channel_id: &str) -> Result<String, DeepLinkError>;
}

/// Builds the "add channel" page URL for a channel, authenticated by the SDK app key.
#[derive(Debug, Clone)]
pub struct ChannelUrlResolver {
    base_url: String,
    app_key: String,
}

impl ChannelUrlResolver {
    pub fn new(base_url: &str, app_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_key: app_key.to_string(),
        }
    }

    /// SDK initialisation: binds the resolver to the configured app key.
    pub fn from_settings(deep_link: &DeepLinkSettings, sdk: &SdkSettings) -> Self {
        if sdk.app_key.trim().is_empty() {
            tracing::warn!("SDK app key is empty; deep links will fail to resolve");
        }
        Self::new(&deep_link.resolver_base_url, &sdk.app_key)
    }
}

impl ChannelResolver for ChannelUrlResolver {
    fn resolve(&self, channel_id: &str) -> Result<String, DeepLinkError> {
        let channel_id = channel_id.trim();
        if channel_id.is_empty() {
            return Err(DeepLinkError::EmptyChannelId);
        }
        if self.app_key.trim().is_empty() {
            return Err(DeepLinkError::MissingAppKey);
        }
        match self.base_url.strip_prefix("https://") {
            Some(host) if !host.is_empty() => {}
            _ => return Err(DeepLinkError::InvalidBaseUrl(self.base_url.clone())),
        }

        Ok(format!(
            "{}/{}/friend?app_key={}&api_ver=1.0",
            self.base_url,
            urlencoding(channel_id),
            urlencoding(self.app_key.trim())
        ))
    }
}

fn urlencoding(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(char::from(b"0123456789ABCDEF"[(b >> 4) as usize]));
                out.push(char::from(b"0123456789ABCDEF"[(b & 0xf) as usize]));
            }
        }
    }
    out
}
