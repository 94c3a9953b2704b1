//! Dual-speed key-repeat timing.
//!
//! One [`KeyRepeat`] instance drives selection movement while browsing and
//! a second one drives value adjustment while editing; both follow the
//! same cadence: immediate fire on a fresh press, then the initial delay,
//! then the slow hold rate until the hold is old enough to switch to the
//! fast rate.

/// Per-menu repeat cadence and deadband configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuSettings {
    /// Delay before the first repeat (ms).
    pub initial_repeat_ms: u64,
    /// Slow repeat rate (ms).
    pub hold_repeat_ms: u64,
    /// Fast repeat rate (ms).
    pub fast_repeat_ms: u64,
    /// Hold duration after which the fast rate applies (ms).
    pub fast_after_ms: u64,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            initial_repeat_ms: crate::config::REPEAT_INITIAL_MS,
            hold_repeat_ms: crate::config::REPEAT_HOLD_MS,
            fast_repeat_ms: crate::config::REPEAT_FAST_MS,
            fast_after_ms: crate::config::REPEAT_AFTER_MS,
        }
    }
}

/// Repeat-timer state machine for one held direction.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct KeyRepeat {
    dir: i8,
    active: bool,
    next_at: u64,
    start_at: u64,
}

impl KeyRepeat {
    /// Feed the currently asserted direction (-1, 0, +1) for this tick.
    /// Returns true when one step should fire now.
    pub(crate) fn step(&mut self, now: u64, dir: i8, t: &MenuSettings) -> bool {
        if dir == 0 {
            // Release: the next press is fresh again.
            self.active = false;
            self.dir = 0;
            return false;
        }

        if !self.active || dir != self.dir {
            // Fresh press or sign change: fire immediately.
            self.active = true;
            self.dir = dir;
            self.start_at = now;
            self.next_at = now + t.initial_repeat_ms;
            return true;
        }

        if now >= self.next_at {
            let elapsed = now - self.start_at;
            self.next_at = now
                + if elapsed >= t.fast_after_ms {
                    t.fast_repeat_ms
                } else {
                    t.hold_repeat_ms
                };
            return true;
        }

        false
    }
}
