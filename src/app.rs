//! App Core for WebShell.
//!
//! Holds the settings, the splash and page host controllers and the deep-link
//! resolver, and sequences splash → host.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::managers::page_host::{PageHost, PageHostTrait};
use crate::managers::splash::{SplashController, SplashOutcome};
use crate::services::connectivity_probe::{ConnectivityProbe, SystemProbe};
use crate::services::deep_link::{ChannelResolver, ChannelUrlResolver};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::effect::Effect;
use crate::types::errors::SettingsError;
use crate::types::settings::ShellSettings;

/// Which controller currently owns the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Splash,
    Hosting,
    ShutDown,
}

pub struct App {
    pub settings: ShellSettings,
    pub splash: SplashController,
    pub host: PageHost,
    pub resolver: Arc<dyn ChannelResolver>,
    phase: Phase,
}

impl App {
    pub fn new(
        settings: ShellSettings,
        probe: Box<dyn ConnectivityProbe>,
        resolver: Arc<dyn ChannelResolver>,
    ) -> Self {
        let splash = SplashController::new(settings.timing.splash());
        let host = PageHost::new(&settings, probe);
        Self {
            settings,
            splash,
            host,
            resolver,
            phase: Phase::Splash,
        }
    }

    /// Loads settings through `engine` and wires the system probe and channel resolver.
    pub fn from_engine(engine: &mut SettingsEngine) -> Result<Self, SettingsError> {
        let settings = engine.load()?;
        let probe = SystemProbe::new(settings.connectivity.recognized_transports.clone());
        let resolver = ChannelUrlResolver::from_settings(&settings.deep_link, &settings.sdk);
        Ok(Self::new(settings, Box::new(probe), Arc::new(resolver)))
    }

    /// Shows the splash. Returns the delay after which `on_splash_elapsed` is due.
    pub fn startup(&mut self, now: Instant) -> Duration {
        self.splash.start(now)
    }

    /// Hands control to the page host the first time the splash expires.
    pub fn on_splash_elapsed(&mut self, now: Instant) -> Vec<Effect> {
        match self.splash.on_elapsed(now) {
            SplashOutcome::HandOff if self.phase == Phase::Splash => {
                self.phase = Phase::Hosting;
                self.host.start(now)
            }
            _ => Vec::new(),
        }
    }

    /// Tears the host down. Returns the effects needed to drop pending timers.
    pub fn shutdown(&mut self) -> Vec<Effect> {
        self.phase = Phase::ShutDown;
        self.host.destroy()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}
