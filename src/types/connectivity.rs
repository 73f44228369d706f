use serde::{Deserialize, Serialize};

/// Kind of network transport backing an active interface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Wifi,
    Cellular,
    Ethernet,
    Other,
}

/// Result of one connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub active: Vec<Transport>,
    pub available: bool,
}

impl ProbeReport {
    /// Builds a report, marking it available when any active transport is recognized.
    pub fn from_active(active: Vec<Transport>, recognized: &[Transport]) -> Self {
        let available = active.iter().any(|t| recognized.contains(t));
        Self { active, available }
    }

    pub fn unavailable() -> Self {
        Self {
            active: Vec::new(),
            available: false,
        }
    }
}
