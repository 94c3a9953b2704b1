//! Input normalization with edge detection and consumption.
//!
//! [`InputMapper::update`] must run exactly once per UI tick, before any
//! state query for that tick. Each call snapshots the previous confirm/back
//! levels (for edge detection across the tick boundary), wipes the rest,
//! and dispatches to exactly one mode-specific reader.

use super::{InputMode, InputSource};
use crate::config::DEADZONE;
use crate::gamepad::{DPAD_DOWN, DPAD_LEFT, DPAD_RIGHT, DPAD_UP};

/// Logical button identifiers for rebinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    A,
    B,
    X,
    Y,
    Start,
    Select,
    None,
}

/// Unified per-tick control snapshot, shared across all input modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
    pub back: bool,
    pub menu: bool,
    pub alt: bool,
    pub start: bool,
    pub select: bool,

    // Edge tracking (carried over from the previous tick) and one-shot
    // consumption flags (reset every update).
    pub confirm_last: bool,
    pub back_last: bool,
    pub confirm_consumed: bool,
    pub back_consumed: bool,
}

/// Logical-to-physical button bindings, resolvable at runtime.
#[derive(Debug, Clone, Copy)]
struct Bindings {
    confirm: ButtonId,
    back: ButtonId,
    menu: ButtonId,
    alt: ButtonId,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            confirm: ButtonId::A,
            back: ButtonId::B,
            menu: ButtonId::Start,
            alt: ButtonId::Select,
        }
    }
}

/// Normalizes all input sources into one [`ControlState`].
pub struct InputMapper {
    s: ControlState,
    map: Bindings,
    deadzone: i16,
}

impl InputMapper {
    pub fn new() -> Self {
        Self {
            s: ControlState::default(),
            map: Bindings::default(),
            deadzone: DEADZONE,
        }
    }

    /// Analog magnitude below which stick input is ignored.
    pub fn set_deadzone(&mut self, dz: i16) {
        self.deadzone = dz;
    }

    /// Refresh the control snapshot from the given source. Call once per
    /// tick; rebinds applied earlier take effect here.
    pub fn update(&mut self, mode: InputMode, src: &dyn InputSource) {
        let prev_confirm = self.s.confirm;
        let prev_back = self.s.back;

        // Reset state but preserve the "last" levels for edge detection.
        self.s = ControlState::default();
        self.s.confirm_last = prev_confirm;
        self.s.back_last = prev_back;

        match mode {
            InputMode::Gamepad => self.read_gamepad(src),
            InputMode::Mech => self.read_mechanical(src),
            InputMode::Touch => self.read_touch(src),
        }
    }

    // Level accessors

    pub fn up(&self) -> bool {
        self.s.up
    }
    pub fn down(&self) -> bool {
        self.s.down
    }
    pub fn left(&self) -> bool {
        self.s.left
    }
    pub fn right(&self) -> bool {
        self.s.right
    }
    pub fn menu(&self) -> bool {
        self.s.menu
    }
    pub fn alt(&self) -> bool {
        self.s.alt
    }
    pub fn start(&self) -> bool {
        self.s.start
    }
    pub fn select(&self) -> bool {
        self.s.select
    }

    // Edge-detect helpers (trigger once per press)

    /// True iff confirm is asserted now, was not asserted last tick, and
    /// has not been consumed this tick.
    pub fn confirm_pressed(&self) -> bool {
        self.s.confirm && !self.s.confirm_last && !self.s.confirm_consumed
    }

    pub fn back_pressed(&self) -> bool {
        self.s.back && !self.s.back_last && !self.s.back_consumed
    }

    /// Swallow the confirm edge for the rest of this tick.
    pub fn consume_confirm(&mut self) {
        self.s.confirm_consumed = true;
    }

    pub fn consume_back(&mut self) {
        self.s.back_consumed = true;
    }

    // Rebinding (takes effect on the next update)

    pub fn rebind_confirm(&mut self, id: ButtonId) {
        self.map.confirm = id;
    }

    pub fn rebind_back(&mut self, id: ButtonId) {
        self.map.back = id;
    }

    // Mode-specific readers

    fn read_gamepad(&mut self, src: &dyn InputSource) {
        let pad = src.gamepad();
        if !pad.connected {
            return;
        }
        let dz = self.deadzone;

        // Digital d-pad OR analog stick past the deadzone.
        self.s.up = pad.dpad & DPAD_UP != 0 || pad.ly < -dz;
        self.s.down = pad.dpad & DPAD_DOWN != 0 || pad.ly > dz;
        self.s.left = pad.dpad & DPAD_LEFT != 0 || pad.lx < -dz;
        self.s.right = pad.dpad & DPAD_RIGHT != 0 || pad.lx > dz;

        self.s.confirm = pad.button(self.map.confirm);
        self.s.back = pad.button(self.map.back);
        self.s.menu = pad.button(self.map.menu);
        self.s.alt = pad.button(self.map.alt);
        self.s.start = pad.start;
        self.s.select = pad.select;
    }

    fn read_mechanical(&mut self, src: &dyn InputSource) {
        let m = src.mechanical();
        self.s.up = m.up;
        self.s.down = m.down;
        self.s.left = m.left;
        self.s.right = m.right;
        self.s.confirm = m.confirm;
        self.s.back = m.back;
        self.s.start = m.start;
        self.s.select = m.select;
    }

    fn read_touch(&mut self, src: &dyn InputSource) {
        if let Some(t) = src.touch() {
            self.s.confirm = t.tap;
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}
