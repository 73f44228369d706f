//! Property-based tests for the two-press exit confirmation.

use std::time::{Duration, Instant};

use proptest::prelude::*;
use webshell::managers::exit_confirmation::{ExitConfirmation, ExitDecision};
use webshell::managers::page_host::{PageHost, PageHostTrait};
use webshell::services::connectivity_probe::ScriptedProbe;
use webshell::types::effect::Effect;
use webshell::types::settings::ShellSettings;

const WINDOW_MS: u64 = 2000;

proptest! {
    #[test]
    fn second_press_inside_window_exits(gap in 0u64..WINDOW_MS) {
        let t0 = Instant::now();
        let mut flag = ExitConfirmation::new(Duration::from_millis(WINDOW_MS));
        prop_assert_eq!(flag.press(t0), ExitDecision::Armed);
        prop_assert_eq!(flag.press(t0 + Duration::from_millis(gap)), ExitDecision::Exit);
    }

    #[test]
    fn second_press_after_window_rearms(gap in WINDOW_MS..60_000u64) {
        let t0 = Instant::now();
        let mut flag = ExitConfirmation::new(Duration::from_millis(WINDOW_MS));
        flag.press(t0);
        prop_assert_eq!(flag.press(t0 + Duration::from_millis(gap)), ExitDecision::Armed);
    }

    #[test]
    fn single_press_never_exits(idle in 0u64..60_000) {
        let t0 = Instant::now();
        let mut host = PageHost::new(
            &ShellSettings::default(),
            Box::new(ScriptedProbe::new(vec![true])),
        );
        host.start(t0);
        let effects = host.on_back_requested(false, t0);
        prop_assert!(!effects.contains(&Effect::Exit));
        let armed = host.exit_confirmation().is_armed(t0 + Duration::from_millis(idle));
        prop_assert_eq!(armed, idle < WINDOW_MS);
    }

    /// Exits happen exactly when two root presses are less than the window apart,
    /// with each exit consuming the flag.
    #[test]
    fn press_sequences_match_model(gaps in proptest::collection::vec(0u64..5_000, 1..30)) {
        let mut now = Instant::now();
        let mut flag = ExitConfirmation::new(Duration::from_millis(WINDOW_MS));
        let mut armed_at: Option<Instant> = None;

        for gap in gaps {
            now += Duration::from_millis(gap);
            let expected = match armed_at {
                Some(at) if now.duration_since(at) < Duration::from_millis(WINDOW_MS) => {
                    armed_at = None;
                    ExitDecision::Exit
                }
                _ => {
                    armed_at = Some(now);
                    ExitDecision::Armed
                }
            };
            prop_assert_eq!(flag.press(now), expected);
        }
    }
}
