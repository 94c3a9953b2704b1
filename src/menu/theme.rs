//! Menu look and feel.
//!
//! The theme is opaque to the core beyond the orientation field: layout,
//! colors, fonts and animation knobs are passed through to the renderer
//! untouched.

use crate::config;

/// Menu presentation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// DS-style carousel: items offset left/right from the selection.
    Horizontal,
    /// Classic list with a scroll window.
    Vertical,
}

/// Page transition style hint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionStyle {
    None,
    Slide,
    Fade,
    SlideFade,
}

/// Controls the look and feel of a menu instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTheme {
    // Layout
    pub margin_l: i16,
    pub margin_r: i16,
    pub margin_t: i16,
    pub margin_b: i16,
    pub row_h: i16,
    pub icon_pad: i16,
    pub text_pad: i16,
    pub selector_radius: i16,
    pub selector_border: i16,

    // Colors (RGB565)
    pub bg: u16,
    pub fg: u16,
    pub muted: u16,
    pub sel_fill: u16,
    pub sel_border: u16,
    pub disabled: u16,
    pub arrow: u16,
    pub mono_tint: u16,

    // Fonts
    pub text_font: u8,
    pub value_font: u8,

    // Orientation / animation
    pub orientation: Orientation,
    pub page_transition: TransitionStyle,
    pub animations: bool,
    pub anim_page_ms: u16,
    pub anim_ease: u8,
}

impl Default for MenuTheme {
    fn default() -> Self {
        Self {
            margin_l: config::MENU_MARGIN_L,
            margin_r: config::MENU_MARGIN_R,
            margin_t: config::MENU_MARGIN_T,
            margin_b: config::MENU_MARGIN_B,
            row_h: config::MENU_ROW_H,
            icon_pad: config::MENU_ICON_PAD,
            text_pad: config::MENU_TEXT_PAD,
            selector_radius: config::MENU_SELECTOR_RADIUS,
            selector_border: config::MENU_SELECTOR_BORDER,
            bg: config::COL_BG,
            fg: config::COL_FG,
            muted: config::COL_MUTED,
            sel_fill: config::COL_SEL_FILL,
            sel_border: config::COL_SEL_BORD,
            disabled: config::COL_DISABLED,
            arrow: config::COL_ARROW,
            mono_tint: config::COL_MONO_TINT,
            text_font: config::MENU_TEXT_FONT_ID,
            value_font: config::MENU_VALUE_FONT_ID,
            orientation: Orientation::Horizontal,
            page_transition: TransitionStyle::Slide,
            animations: true,
            anim_page_ms: config::ANIM_PAGE_MS,
            anim_ease: config::ANIM_EASE_STRENGTH,
        }
    }
}
