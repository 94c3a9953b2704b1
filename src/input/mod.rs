//! Unified input abstraction - gamepad, mechanical buttons, touch.
//!
//! All three sources are normalized into one [`mapper::ControlState`] by
//! [`mapper::InputMapper`]. The hardware itself sits behind the
//! [`InputSource`] trait, injected at the application's top-level loop;
//! the core never talks to pins or radios directly.

pub mod mapper;

pub use mapper::{ButtonId, ControlState, InputMapper};

use crate::gamepad::GamepadState;

/// Active input source for a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    Touch,
    Mech,
    Gamepad,
}

/// Raw mechanical button levels (true = pressed).
///
/// Debounce is the source's responsibility; the mapper copies levels as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MechState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
    pub back: bool,
    pub start: bool,
    pub select: bool,
}

/// A touch reading for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    pub x: i16,
    pub y: i16,
    /// One-shot tap flag, asserted by the touch driver for a single tick.
    pub tap: bool,
}

/// Frame-local input readers supplied by the application.
///
/// Every method has a neutral default so a platform only implements the
/// sources it actually has (the weak-hook pattern of the original
/// firmware, expressed as a capability trait).
pub trait InputSource {
    /// Latest gamepad snapshot (see [`crate::gamepad::GamepadSource`]).
    fn gamepad(&self) -> GamepadState {
        GamepadState::NEUTRAL
    }

    /// Current mechanical button levels.
    fn mechanical(&self) -> MechState {
        MechState::default()
    }

    /// Touch reading for this tick, if a touch controller is present.
    fn touch(&self) -> Option<TouchSample> {
        None
    }
}

/// Input source with no hardware behind it; every read is neutral.
pub struct NullInput;

impl InputSource for NullInput {}
