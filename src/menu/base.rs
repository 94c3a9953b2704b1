//! Menu navigation state machine.
//!
//! A [`Menu`] owns a bounded item list, the current selection, the
//! vertical scroll window, and the key-repeat state that drives held
//! directional input. Drawing is delegated to the injected renderer and
//! happens only when the dirty flag is set.

use heapless::Vec;
use log::debug;

use super::item::MenuItem;
use super::render::{MenuFrame, MenuRenderer};
use super::repeat::{KeyRepeat, MenuSettings};
use super::stack::{MenuId, MenuStack};
use super::theme::{MenuTheme, Orientation, TransitionStyle};
use super::Services;
use crate::config::{BACK_LOCK_MS, MAX_MENU_ITEMS, MENU_VISIBLE_ROWS};
use crate::error::Error;
use crate::input::{InputMapper, InputMode};

/// A navigable menu: ordered items, clamped selection, dirty-flag redraw.
pub struct Menu {
    /// Repeat cadence for held directional input.
    pub settings: MenuSettings,
    pub(crate) theme: MenuTheme,
    pub(crate) mode: InputMode,
    pub(crate) items: Vec<MenuItem, MAX_MENU_ITEMS>,
    pub(crate) sel: usize,
    pub(crate) first_visible: usize,
    pub(crate) dirty: bool,
    pub(crate) activated: Option<usize>,
    nav: KeyRepeat,
}

impl Menu {
    pub fn new() -> Self {
        Self {
            settings: MenuSettings::default(),
            theme: MenuTheme::default(),
            mode: InputMode::Gamepad,
            items: Vec::new(),
            sel: 0,
            first_visible: 0,
            dirty: true,
            activated: None,
            nav: KeyRepeat::default(),
        }
    }

    // Dirty flag control

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // Theme & mode

    pub fn set_theme(&mut self, theme: MenuTheme) {
        self.theme = theme;
        self.dirty = true;
    }

    pub fn theme(&self) -> &MenuTheme {
        &self.theme
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_orientation(&mut self, o: Orientation) {
        self.theme.orientation = o;
        self.dirty = true;
    }

    pub fn orientation(&self) -> Orientation {
        self.theme.orientation
    }

    pub fn set_page_transition(&mut self, s: TransitionStyle) {
        self.theme.page_transition = s;
        self.dirty = true;
    }

    pub fn enable_animations(&mut self, on: bool) {
        self.theme.animations = on;
        self.dirty = true;
    }

    // Item management

    /// Append an item. Fails with [`Error::MenuFull`] past capacity and
    /// leaves the menu unchanged.
    pub fn add_item(&mut self, item: MenuItem) -> Result<(), Error> {
        self.items.push(item).map_err(|_| {
            debug!("menu: item capacity reached");
            Error::MenuFull
        })?;
        self.dirty = true;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, idx: usize) -> Option<&MenuItem> {
        self.items.get(idx)
    }

    pub fn item_mut(&mut self, idx: usize) -> Option<&mut MenuItem> {
        self.items.get_mut(idx)
    }

    pub fn set_item_enabled(&mut self, idx: usize, enabled: bool) {
        if let Some(it) = self.items.get_mut(idx) {
            it.enabled = enabled;
            self.dirty = true;
        }
    }

    pub fn set_item_label(&mut self, idx: usize, text: &str) {
        if let Some(it) = self.items.get_mut(idx) {
            it.set_label(text);
            self.dirty = true;
        }
    }

    /// Current value of the item, or 0 for an out-of-range index.
    pub fn item_value(&self, idx: usize) -> i64 {
        self.items.get(idx).map_or(0, |it| it.value())
    }

    /// Set an item value (clamped into its domain). Out-of-range indices
    /// are ignored.
    pub fn set_item_value(&mut self, idx: usize, v: i64) {
        if let Some(it) = self.items.get_mut(idx) {
            it.set_value(v);
        }
    }

    pub fn link_submenu(&mut self, idx: usize, child: MenuId) {
        if let Some(it) = self.items.get_mut(idx) {
            it.submenu = Some(child);
        }
    }

    // Selection

    pub fn selected(&self) -> usize {
        self.sel
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Move the selection to `idx` (clamped to the item count).
    pub fn focus(&mut self, idx: usize) {
        if self.items.is_empty() {
            return;
        }
        let idx = idx.min(self.items.len() - 1);
        if idx != self.sel {
            self.sel = idx;
            self.dirty = true;
        }
        self.ensure_visible();
    }

    /// One update tick: read input, move the selection, redraw if dirty.
    /// Returns the index activated by a confirm edge this tick, if any.
    pub fn update(&mut self, now: u64, svc: &mut Services<'_>) -> Option<usize> {
        self.activated = None;
        if svc.stack.take_top_dirty() {
            self.dirty = true;
        }
        svc.mapper.update(self.mode, svc.input);
        self.handle_browse(now, &mut *svc.mapper, &mut *svc.stack);
        self.draw_if_dirty(svc.renderer, false, false);
        self.activated.take()
    }

    // Shared browse handling (also used by EditMenu outside edit mode)

    pub(crate) fn handle_browse(
        &mut self,
        now: u64,
        controls: &mut InputMapper,
        stack: &mut MenuStack,
    ) {
        if stack.locked(now) {
            return;
        }

        let d = self.nav_dir(controls);
        if self.nav.step(now, d, &self.settings) {
            self.move_sel(d);
        }

        if controls.confirm_pressed() {
            self.activated = Some(self.sel);
            controls.consume_confirm();
        }
        if controls.back_pressed() {
            stack.pop();
            controls.consume_back();
            stack.lock_for(now, BACK_LOCK_MS);
        }
    }

    /// Direction for the orientation's movement axis; the orthogonal axis
    /// is ignored.
    fn nav_dir(&self, controls: &InputMapper) -> i8 {
        match self.theme.orientation {
            Orientation::Horizontal => {
                if controls.left() {
                    -1
                } else if controls.right() {
                    1
                } else {
                    0
                }
            }
            Orientation::Vertical => {
                if controls.up() {
                    -1
                } else if controls.down() {
                    1
                } else {
                    0
                }
            }
        }
    }

    pub(crate) fn move_sel(&mut self, delta: i8) {
        if self.items.is_empty() {
            return;
        }
        let max = self.items.len() as i64 - 1;
        let new = (self.sel as i64 + delta as i64).clamp(0, max) as usize;
        if new != self.sel {
            self.sel = new;
            self.dirty = true;
            self.ensure_visible();
        }
    }

    /// Keep the selection inside the vertical scroll window. Carousels
    /// have no window: every item is offset from the selection instead.
    fn ensure_visible(&mut self) {
        if self.theme.orientation != Orientation::Vertical {
            return;
        }
        if self.sel < self.first_visible {
            self.first_visible = self.sel;
        }
        if self.sel >= self.first_visible + MENU_VISIBLE_ROWS {
            self.first_visible = self.sel + 1 - MENU_VISIBLE_ROWS;
        }
    }

    pub(crate) fn draw_if_dirty(
        &mut self,
        renderer: &mut dyn MenuRenderer,
        editing: bool,
        blink_on: bool,
    ) {
        if !self.dirty {
            return;
        }
        renderer.draw_menu(&MenuFrame {
            items: &self.items,
            selected: self.sel,
            first_visible: self.first_visible,
            editing,
            blink_on,
            theme: &self.theme,
        });
        self.dirty = false;
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}
