//! Application-wide constants and compile-time configuration.
//!
//! All capacity limits, timing parameters, LED levels, and theme
//! defaults live here so they can be tuned in one place.

// Menu capacity

/// Maximum number of items per menu. Adding past this fails with
/// `Error::MenuFull` and leaves the menu unchanged.
pub const MAX_MENU_ITEMS: usize = 15;

/// Maximum nesting depth of the menu stack (root included).
pub const MAX_MENU_DEPTH: usize = 8;

/// Rows kept inside the vertical scroll window before it advances.
pub const MENU_VISIBLE_ROWS: usize = 6;

/// Capacity of a menu item label.
pub const MAX_LABEL_LEN: usize = 32;

/// Capacity of a settings file path.
pub const MAX_PATH_LEN: usize = 64;

// Input timing / deadband

/// Analog stick magnitude below which direction bits stay deasserted.
pub const DEADZONE: i16 = 200;

/// Delay before the first key repeat fires (ms).
pub const REPEAT_INITIAL_MS: u64 = 400;

/// Slow repeat rate while freshly held (ms).
pub const REPEAT_HOLD_MS: u64 = 220;

/// Fast repeat rate once a hold is established (ms).
pub const REPEAT_FAST_MS: u64 = 120;

/// Hold time after which the repeat switches from slow to fast (ms).
pub const REPEAT_AFTER_MS: u64 = 800;

/// Input lock applied after popping a menu off the stack (ms).
pub const BACK_LOCK_MS: u64 = 200;

/// Input lock applied after pushing a submenu (ms).
pub const PUSH_LOCK_MS: u64 = 150;

// Gamepad pairing + LED feedback

/// How long the pairing button must be held to enter pairing mode (ms).
pub const HOLD_TIME_MS: u64 = 3000;

/// Pairing window before acceptance times out (ms).
pub const FLASH_TIME_MS: u64 = 30_000;

/// LED square-wave half period while pairing (ms).
pub const BLINK_PERIOD_MS: u64 = 250;

/// Debounce sampling window for the pairing button (ms).
pub const DEBOUNCE_MS: u64 = 50;

/// LED duty level while pairing (blink high phase) and while connected.
pub const LED_BRIGHT: u8 = 40;

/// LED duty level when off.
pub const LED_OFF: u8 = 0;

// Edit mode

/// Blink half period for the value being edited (ms).
pub const EDIT_BLINK_MS: u64 = 300;

/// Minimum interval between two autosave writes (ms). Adjustments inside
/// the window are coalesced into the next qualifying write.
pub const AUTOSAVE_THROTTLE_MS: u64 = 300;

/// Default settings document path.
pub const DEFAULT_SETTINGS_PATH: &str = "/settings.json";

// Theme defaults

/// Encode RGB888 into RGB565 inline.
pub const fn rgb(r: u8, g: u8, b: u8) -> u16 {
    (((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16)
}

pub const COL_BG: u16 = rgb(10, 11, 16);
pub const COL_FG: u16 = rgb(230, 230, 235);
pub const COL_MUTED: u16 = rgb(150, 150, 160);
pub const COL_SEL_FILL: u16 = rgb(30, 90, 200);
pub const COL_SEL_BORD: u16 = rgb(255, 255, 255);
pub const COL_DISABLED: u16 = rgb(100, 100, 110);
pub const COL_ARROW: u16 = rgb(180, 180, 190);
pub const COL_MONO_TINT: u16 = rgb(230, 230, 235);

// Layout defaults (pixels)

pub const MENU_MARGIN_L: i16 = 10;
pub const MENU_MARGIN_R: i16 = 10;
pub const MENU_MARGIN_T: i16 = 10;
pub const MENU_MARGIN_B: i16 = 10;
pub const MENU_ROW_H: i16 = 36;
pub const MENU_ICON_PAD: i16 = 8;
pub const MENU_TEXT_PAD: i16 = 10;
pub const MENU_SELECTOR_RADIUS: i16 = 8;
pub const MENU_SELECTOR_BORDER: i16 = 2;

pub const MENU_TEXT_FONT_ID: u8 = 2;
pub const MENU_VALUE_FONT_ID: u8 = 2;

// Animation defaults (opaque to the core, passed through to the renderer)

pub const ANIM_PAGE_MS: u16 = 180;
pub const ANIM_EASE_STRENGTH: u8 = 2;
