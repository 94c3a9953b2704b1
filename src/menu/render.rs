//! Renderer boundary.
//!
//! The core never draws pixels: when a menu is dirty its `update` hands a
//! [`MenuFrame`] to the injected [`MenuRenderer`] and forgets about it.
//! Carousel culling, icon loading and value formatting are the renderer's
//! business.

use super::item::MenuItem;
use super::theme::MenuTheme;

/// Everything the renderer needs for one redraw.
pub struct MenuFrame<'a> {
    pub items: &'a [MenuItem],
    /// Currently selected item index.
    pub selected: usize,
    /// First row inside the vertical scroll window (0 for carousels).
    pub first_visible: usize,
    /// Whether the selected item is in edit mode.
    pub editing: bool,
    /// Blink phase for the value being edited (high = highlight color).
    pub blink_on: bool,
    pub theme: &'a MenuTheme,
}

/// External draw routine. Invoked only when a menu is dirty; must not
/// call back into the menu within the same update.
pub trait MenuRenderer {
    fn draw_menu(&mut self, frame: &MenuFrame<'_>);
}

/// Renderer that draws nothing (headless operation and tests).
pub struct NullRenderer;

impl MenuRenderer for NullRenderer {
    fn draw_menu(&mut self, _frame: &MenuFrame<'_>) {}
}
