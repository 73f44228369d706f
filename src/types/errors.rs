use std::fmt;

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === DeepLinkError ===

/// Errors raised while resolving an intercepted deep link into a chat-channel URL.
#[derive(Debug, Clone, PartialEq)]
pub enum DeepLinkError {
    /// The channel identifier is empty.
    EmptyChannelId,
    /// No SDK application key was configured.
    MissingAppKey,
    /// The resolver base URL is not an absolute https URL.
    InvalidBaseUrl(String),
    /// The resolver task did not produce a result.
    ResolverUnavailable(String),
}

impl fmt::Display for DeepLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeepLinkError::EmptyChannelId => write!(f, "Channel identifier is empty"),
            DeepLinkError::MissingAppKey => write!(f, "SDK application key is not configured"),
            DeepLinkError::InvalidBaseUrl(url) => {
                write!(f, "Invalid channel resolver base URL: {}", url)
            }
            DeepLinkError::ResolverUnavailable(msg) => {
                write!(f, "Channel resolver unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for DeepLinkError {}

// === PlatformError ===

/// Errors related to OS integration (opening URLs, enumerating interfaces).
#[derive(Debug)]
pub enum PlatformError {
    /// The external URL opener could not be launched or reported failure.
    OpenFailed(String),
    /// The URL handed to the opener was rejected before launching anything.
    InvalidUrl(String),
    /// An I/O error occurred while querying the OS.
    IoError(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::OpenFailed(msg) => write!(f, "Failed to open URL: {}", msg),
            PlatformError::InvalidUrl(url) => write!(f, "Refusing to open URL: {}", url),
            PlatformError::IoError(msg) => write!(f, "Platform I/O error: {}", msg),
        }
    }
}

impl std::error::Error for PlatformError {}

// === ShellError ===

/// Top-level errors that abort the shell during startup.
#[derive(Debug)]
pub enum ShellError {
    /// Settings could not be loaded or validated.
    Settings(SettingsError),
    /// The native window could not be created.
    Window(String),
    /// The embedded web view could not be created.
    WebView(String),
    /// The async runtime backing timers could not be started.
    Runtime(String),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Settings(err) => write!(f, "Settings error: {}", err),
            ShellError::Window(msg) => write!(f, "Window creation failed: {}", msg),
            ShellError::WebView(msg) => write!(f, "WebView creation failed: {}", msg),
            ShellError::Runtime(msg) => write!(f, "Runtime startup failed: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Settings(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SettingsError> for ShellError {
    fn from(err: SettingsError) -> Self {
        ShellError::Settings(err)
    }
}
