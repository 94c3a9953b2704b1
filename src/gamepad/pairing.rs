//! Hold-to-pair state machine with debounce and LED feedback.
//!
//! States: disconnected -> hold-detect -> pairing -> connected.
//! Holding the pairing button for `HOLD_TIME_MS` while disconnected opens
//! a pairing window; the window closes on connection (LED solid) or after
//! `FLASH_TIME_MS` without one (LED off). All timing is expressed against
//! the caller-supplied millisecond tick, never as blocking waits.

use log::info;

use super::{GamepadState, PadTransport, StatusLed};
use crate::config::{
    BLINK_PERIOD_MS, DEBOUNCE_MS, FLASH_TIME_MS, HOLD_TIME_MS, LED_BRIGHT, LED_OFF,
};

/// Pairing machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairingPhase {
    /// No controller, pairing button idle.
    Disconnected,
    /// Pairing button held, waiting out the hold time.
    HoldDetect { since: u64 },
    /// Accepting new connections, LED blinking.
    Pairing { since: u64 },
    /// Controller link up, LED solid.
    Connected,
}

/// Polls the controller transport, maintains the shared [`GamepadState`]
/// snapshot, and runs the pairing button/LED logic.
pub struct GamepadSource {
    snapshot: GamepadState,
    phase: PairingPhase,

    // Pairing button debounce
    debounced: bool,
    button_last: bool,
    last_sample: u64,
    first_poll: bool,

    // LED blink
    last_blink: u64,
    led_on: bool,
}

impl GamepadSource {
    pub const fn new() -> Self {
        Self {
            snapshot: GamepadState::NEUTRAL,
            phase: PairingPhase::Disconnected,
            debounced: false,
            button_last: false,
            last_sample: 0,
            first_poll: true,
            last_blink: 0,
            led_on: false,
        }
    }

    /// Latest controller snapshot. Neutral while disconnected.
    pub fn state(&self) -> &GamepadState {
        &self.snapshot
    }

    pub fn phase(&self) -> PairingPhase {
        self.phase
    }

    /// Run one poll cycle. Call exactly once per UI tick, before any menu
    /// consumes the snapshot that tick.
    ///
    /// `raw_button` is the raw pairing-button level (true = pressed); it is
    /// debounced here before edge/hold timing is evaluated.
    pub fn poll(
        &mut self,
        now: u64,
        raw_button: bool,
        link: &mut dyn PadTransport,
        led: &mut dyn StatusLed,
    ) {
        // Refresh the shared snapshot: live copy while connected, zeroed
        // defaults otherwise so consumers never see stale input.
        if link.connected() {
            self.snapshot = link.sample();
            self.snapshot.connected = true;
        } else {
            self.snapshot = GamepadState::NEUTRAL;
        }

        // Debounce: re-sample the raw level at most once per window.
        if now.wrapping_sub(self.last_sample) >= DEBOUNCE_MS {
            self.debounced = raw_button;
            self.last_sample = now;
        }

        // First poll after boot must not produce a spurious press edge.
        if self.first_poll {
            self.first_poll = false;
            self.button_last = self.debounced;
            return;
        }

        let pressed_edge = self.debounced && !self.button_last;
        let released = !self.debounced;
        self.button_last = self.debounced;

        match self.phase {
            PairingPhase::Disconnected => {
                if link.connected() {
                    self.enter_connected(led);
                } else if pressed_edge {
                    self.phase = PairingPhase::HoldDetect { since: now };
                }
            }
            PairingPhase::HoldDetect { since } => {
                if link.connected() {
                    self.enter_connected(led);
                } else if released {
                    self.phase = PairingPhase::Disconnected;
                } else if now.wrapping_sub(since) >= HOLD_TIME_MS {
                    info!("pad: pairing mode");
                    link.set_accepting(true);
                    led.set_level(LED_OFF);
                    self.led_on = false;
                    self.last_blink = now;
                    self.phase = PairingPhase::Pairing { since: now };
                }
            }
            PairingPhase::Pairing { since } => {
                if link.connected() {
                    // Auto-stop: no further connections once one is up.
                    info!("pad: connected");
                    link.set_accepting(false);
                    self.enter_connected(led);
                } else if now.wrapping_sub(since) >= FLASH_TIME_MS {
                    info!("pad: pairing timed out");
                    link.set_accepting(false);
                    led.set_level(LED_OFF);
                    self.phase = PairingPhase::Disconnected;
                } else if now.wrapping_sub(self.last_blink) >= BLINK_PERIOD_MS {
                    self.last_blink = now;
                    self.led_on = !self.led_on;
                    led.set_level(if self.led_on { LED_BRIGHT } else { LED_OFF });
                }
            }
            PairingPhase::Connected => {
                if !link.connected() {
                    info!("pad: disconnected");
                    led.set_level(LED_OFF);
                    self.snapshot = GamepadState::NEUTRAL;
                    self.phase = PairingPhase::Disconnected;
                } else {
                    led.set_level(LED_BRIGHT);
                }
            }
        }
    }

    fn enter_connected(&mut self, led: &mut dyn StatusLed) {
        led.set_level(LED_BRIGHT);
        self.phase = PairingPhase::Connected;
    }
}

impl Default for GamepadSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeLink {
        connected: bool,
        accepting: bool,
        sample: GamepadState,
    }

    impl FakeLink {
        fn new() -> Self {
            Self {
                connected: false,
                accepting: false,
                sample: GamepadState::NEUTRAL,
            }
        }
    }

    impl PadTransport for FakeLink {
        fn connected(&self) -> bool {
            self.connected
        }
        fn set_accepting(&mut self, on: bool) {
            self.accepting = on;
        }
        fn sample(&self) -> GamepadState {
            self.sample
        }
    }

    struct FakeLed {
        level: u8,
    }

    impl StatusLed for FakeLed {
        fn set_level(&mut self, level: u8) {
            self.level = level;
        }
    }

    fn rig() -> (GamepadSource, FakeLink, FakeLed) {
        (GamepadSource::new(), FakeLink::new(), FakeLed { level: 0 })
    }

    #[test]
    fn first_poll_suppresses_press_edge() {
        let (mut src, mut link, mut led) = rig();
        // Button already down at boot: must not start hold detection.
        src.poll(0, true, &mut link, &mut led);
        src.poll(10, true, &mut link, &mut led);
        assert_eq!(src.phase(), PairingPhase::Disconnected);
    }

    #[test]
    fn hold_for_exact_hold_time_enters_pairing() {
        let (mut src, mut link, mut led) = rig();
        src.poll(0, false, &mut link, &mut led);
        // Press; debounce re-samples after DEBOUNCE_MS.
        src.poll(DEBOUNCE_MS, true, &mut link, &mut led);
        let since = DEBOUNCE_MS;
        assert_eq!(src.phase(), PairingPhase::HoldDetect { since });

        // Still held just before the threshold.
        src.poll(since + HOLD_TIME_MS - 1, true, &mut link, &mut led);
        assert_eq!(src.phase(), PairingPhase::HoldDetect { since });
        assert!(!link.accepting);

        // Threshold reached.
        src.poll(since + HOLD_TIME_MS, true, &mut link, &mut led);
        assert!(matches!(src.phase(), PairingPhase::Pairing { .. }));
        assert!(link.accepting);
    }

    #[test]
    fn early_release_aborts_hold() {
        let (mut src, mut link, mut led) = rig();
        src.poll(0, false, &mut link, &mut led);
        src.poll(DEBOUNCE_MS, true, &mut link, &mut led);
        src.poll(DEBOUNCE_MS * 2, false, &mut link, &mut led);
        assert_eq!(src.phase(), PairingPhase::Disconnected);
        assert!(!link.accepting);
    }

    #[test]
    fn pairing_window_times_out() {
        let (mut src, mut link, mut led) = rig();
        src.poll(0, false, &mut link, &mut led);
        src.poll(DEBOUNCE_MS, true, &mut link, &mut led);
        src.poll(DEBOUNCE_MS + HOLD_TIME_MS, true, &mut link, &mut led);
        let since = DEBOUNCE_MS + HOLD_TIME_MS;
        assert!(link.accepting);

        // Release the button; window stays open until the timeout.
        src.poll(since + 100, false, &mut link, &mut led);
        assert!(matches!(src.phase(), PairingPhase::Pairing { .. }));

        src.poll(since + FLASH_TIME_MS, false, &mut link, &mut led);
        assert_eq!(src.phase(), PairingPhase::Disconnected);
        assert!(!link.accepting);
        assert_eq!(led.level, LED_OFF);
    }

    #[test]
    fn connection_during_pairing_stops_acceptance() {
        let (mut src, mut link, mut led) = rig();
        src.poll(0, false, &mut link, &mut led);
        src.poll(DEBOUNCE_MS, true, &mut link, &mut led);
        src.poll(DEBOUNCE_MS + HOLD_TIME_MS, true, &mut link, &mut led);
        assert!(link.accepting);

        link.connected = true;
        link.sample.a = true;
        src.poll(DEBOUNCE_MS + HOLD_TIME_MS + 300, false, &mut link, &mut led);
        assert_eq!(src.phase(), PairingPhase::Connected);
        assert!(!link.accepting);
        assert_eq!(led.level, LED_BRIGHT);
        assert!(src.state().connected);
        assert!(src.state().a);
    }

    #[test]
    fn led_blinks_during_pairing() {
        let (mut src, mut link, mut led) = rig();
        src.poll(0, false, &mut link, &mut led);
        src.poll(DEBOUNCE_MS, true, &mut link, &mut led);
        let t0 = DEBOUNCE_MS + HOLD_TIME_MS;
        src.poll(t0, true, &mut link, &mut led);
        assert_eq!(led.level, LED_OFF);

        src.poll(t0 + BLINK_PERIOD_MS, true, &mut link, &mut led);
        assert_eq!(led.level, LED_BRIGHT);
        src.poll(t0 + 2 * BLINK_PERIOD_MS, true, &mut link, &mut led);
        assert_eq!(led.level, LED_OFF);
    }

    #[test]
    fn disconnect_resets_snapshot() {
        let (mut src, mut link, mut led) = rig();
        link.connected = true;
        link.sample.lx = 500;
        link.sample.b = true;
        src.poll(0, false, &mut link, &mut led);
        src.poll(10, false, &mut link, &mut led);
        assert_eq!(src.phase(), PairingPhase::Connected);
        assert_eq!(src.state().lx, 500);

        link.connected = false;
        src.poll(20, false, &mut link, &mut led);
        assert_eq!(src.phase(), PairingPhase::Disconnected);
        assert_eq!(*src.state(), GamepadState::NEUTRAL);
        assert_eq!(led.level, LED_OFF);
    }

    #[test]
    fn debounce_filters_short_glitch() {
        let (mut src, mut link, mut led) = rig();
        src.poll(0, false, &mut link, &mut led);
        // Glitch shorter than the sampling window never becomes a press.
        src.poll(10, true, &mut link, &mut led);
        src.poll(20, false, &mut link, &mut led);
        src.poll(DEBOUNCE_MS + 10, false, &mut link, &mut led);
        assert_eq!(src.phase(), PairingPhase::Disconnected);
    }
}
