//! Connectivity probe.
//!
//! Answers "is any recognized transport active right now?" synchronously.
//! The system probe asks the platform layer; tests script the answers.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::platform;
use crate::types::connectivity::{ProbeReport, Transport};

/// Trait defining the connectivity probe interface.
pub trait ConnectivityProbe: Send {
    fn probe(&self) -> ProbeReport;

    fn is_available(&self) -> bool {
        self.probe().available
    }
}

/// Probe backed by the OS interface list.
pub struct SystemProbe {
    recognized: Vec<Transport>,
}

impl SystemProbe {
    pub fn new(recognized: Vec<Transport>) -> Self {
        Self { recognized }
    }

    pub fn recognized(&self) -> &[Transport] {
        &self.recognized
    }
}

impl ConnectivityProbe for SystemProbe {
    fn probe(&self) -> ProbeReport {
        let report = ProbeReport::from_active(platform::active_transports(), &self.recognized);
        tracing::debug!(active = ?report.active, available = report.available, "connectivity probed");
        report
    }
}

/// Probe that replays a fixed script of availability answers.
///
/// Once the script is exhausted the last answer repeats.
pub struct ScriptedProbe {
    answers: Mutex<VecDeque<bool>>,
    last: Mutex<bool>,
}

impl ScriptedProbe {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            last: Mutex::new(false),
        }
    }

    /// Appends further answers to the script.
    pub fn push(&self, available: bool) {
        if let Ok(mut answers) = self.answers.lock() {
            answers.push_back(available);
        }
    }
}

impl ConnectivityProbe for ScriptedProbe {
    fn probe(&self) -> ProbeReport {
        let next = self.answers.lock().ok().and_then(|mut a| a.pop_front());
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(answer) = next {
            *last = answer;
        }
        if *last {
            ProbeReport {
                active: vec![Transport::Wifi],
                available: true,
            }
        } else {
            ProbeReport::unavailable()
        }
    }
}
