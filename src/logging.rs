//! Tracing subscriber setup.
//!
//! The subscriber is installed before settings are read, so the filter starts
//! from `RUST_LOG` or `DEFAULT_LEVEL` and is narrowed to the configured level
//! once settings are loaded.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Level used until the configured `log_level` is known.
pub const DEFAULT_LEVEL: &str = "info";

/// Handle to the installed filter.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Switches the filter to `level` unless `RUST_LOG` chose it.
    /// Returns `false` when `level` is not a valid filter directive.
    pub fn apply_level(&self, level: &str) -> bool {
        if self.from_env {
            return true;
        }
        match EnvFilter::try_new(level) {
            Ok(filter) => match self.filter.reload(filter) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to apply log level");
                    false
                }
            },
            Err(e) => {
                tracing::warn!(level, error = %e, "ignoring invalid log level");
                false
            }
        }
    }
}

/// Builds the filter: `RUST_LOG` wins over `default_level`, which falls back to `info`.
/// The flag tells whether the environment supplied it.
pub fn build_filter(default_level: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => {
            let filter = EnvFilter::try_new(default_level)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
            (filter, false)
        }
    }
}

/// Installs the global fmt subscriber.
///
/// Returns `None` when a subscriber is already installed; later calls are ignored.
pub fn init(default_level: &str) -> Option<LogHandle> {
    let (filter, from_env) = build_filter(default_level);
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok()?;

    Some(LogHandle {
        filter: handle,
        from_env,
    })
}
