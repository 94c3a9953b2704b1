//! Gamepad subsystem - controller snapshot + pairing state machine.
//!
//! The transport (Bluetooth classic, BLE, USB dongle...) is behind the
//! [`PadTransport`] trait; this module only owns the per-tick snapshot
//! and the hold-to-pair logic with LED feedback.
//!
//! D-Pad bits: bit0=Up, bit1=Down, bit2=Right, bit3=Left.

pub mod pairing;

pub use pairing::{GamepadSource, PairingPhase};

use crate::input::mapper::ButtonId;

/// D-pad bitmask: up.
pub const DPAD_UP: u8 = 0x01;
/// D-pad bitmask: down.
pub const DPAD_DOWN: u8 = 0x02;
/// D-pad bitmask: right.
pub const DPAD_RIGHT: u8 = 0x04;
/// D-pad bitmask: left.
pub const DPAD_LEFT: u8 = 0x08;

/// Latest sampled controller readings.
///
/// Overwritten once per poll cycle by [`GamepadSource::poll`] and consumed
/// read-only by the input mapper. Reset to [`GamepadState::NEUTRAL`] on
/// disconnect so stale input can never leak into the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadState {
    pub connected: bool,

    // Axes (signed, centered on 0)
    pub lx: i16,
    pub ly: i16,
    pub rx: i16,
    pub ry: i16,

    /// D-pad bitmask, see the `DPAD_*` constants.
    pub dpad: u8,

    // Buttons
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub start: bool,
    pub select: bool,
}

impl GamepadState {
    /// All-neutral, disconnected snapshot.
    pub const NEUTRAL: GamepadState = GamepadState {
        connected: false,
        lx: 0,
        ly: 0,
        rx: 0,
        ry: 0,
        dpad: 0,
        a: false,
        b: false,
        x: false,
        y: false,
        start: false,
        select: false,
    };

    /// Resolve a logical button identifier against this snapshot.
    pub fn button(&self, id: ButtonId) -> bool {
        match id {
            ButtonId::A => self.a,
            ButtonId::B => self.b,
            ButtonId::X => self.x,
            ButtonId::Y => self.y,
            ButtonId::Start => self.start,
            ButtonId::Select => self.select,
            ButtonId::None => false,
        }
    }
}

/// Controller transport seam.
///
/// Implemented by the application over whatever radio stack it uses; the
/// pairing machine drives `set_accepting` and reads the link each poll.
pub trait PadTransport {
    /// Whether a controller link is currently established.
    fn connected(&self) -> bool;

    /// Enable or disable acceptance of new controller connections.
    fn set_accepting(&mut self, on: bool);

    /// Read the current controller state. Only called while connected.
    fn sample(&self) -> GamepadState;
}

/// Pairing/status LED seam. `level` is a PWM duty byte, 0 = off.
pub trait StatusLed {
    fn set_level(&mut self, level: u8);
}
