//! Editable menu - in-place value adjustment with throttled autosave.
//!
//! Wraps [`Menu`] with a browse/edit sub-state. Activating an editable
//! item enters edit mode; left/right then adjust the value with the same
//! dual-speed repeat cadence as navigation. Confirm or back exits without
//! rollback (the value was already live-adjusted). A linked submenu takes
//! precedence over edit mode on activation.

use core::ops::{Deref, DerefMut};

use heapless::String;
use log::{info, warn};

use super::base::Menu;
use super::item::EditKind;
use super::repeat::KeyRepeat;
use super::Services;
use crate::config::{AUTOSAVE_THROTTLE_MS, DEFAULT_SETTINGS_PATH, EDIT_BLINK_MS, MAX_PATH_LEN, PUSH_LOCK_MS};
use crate::input::InputMapper;
use crate::menu::stack::MenuStack;
use crate::persist::{load_menu_settings, save_menu_settings, SettingsStore};

/// A [`Menu`] whose items can be edited in place and persisted.
pub struct EditMenu {
    base: Menu,
    editing: bool,
    autosave: bool,
    save_path: String<MAX_PATH_LEN>,
    edit: KeyRepeat,
    blink_on: bool,
    last_save: u64,
}

impl EditMenu {
    pub fn new() -> Self {
        Self {
            base: Menu::new(),
            editing: false,
            autosave: false,
            save_path: path_of(DEFAULT_SETTINGS_PATH),
            edit: KeyRepeat::default(),
            blink_on: false,
            last_save: 0,
        }
    }

    pub fn in_editing(&self) -> bool {
        self.editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    // Autosave

    /// Arm throttled persistence to `path` and load any existing settings
    /// from it. Returns whether existing settings were found; when they
    /// are missing or malformed the compiled-in values stay in place.
    pub fn enable_autosave(&mut self, path: &str, store: &mut dyn SettingsStore) -> bool {
        self.autosave = true;
        self.save_path = path_of(path);
        let loaded = load_menu_settings(&mut self.base, store, path);
        if loaded {
            self.base.mark_dirty();
            info!("menu: loaded settings from {}", path);
        } else {
            info!("menu: no existing settings at {}, using defaults", path);
        }
        loaded
    }

    pub fn disable_autosave(&mut self) {
        self.autosave = false;
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave
    }

    pub fn autosave_path(&self) -> &str {
        self.save_path.as_str()
    }

    /// One update tick. Returns the activated index only for plain items:
    /// submenu links push onto the stack and editable items enter edit
    /// mode instead, both yielding `None` to the host.
    pub fn update(&mut self, now: u64, svc: &mut Services<'_>) -> Option<usize> {
        self.base.activated = None;
        if svc.stack.take_top_dirty() {
            self.base.mark_dirty();
        }
        svc.mapper.update(self.base.mode, svc.input);

        if self.editing {
            self.handle_edit(now, &mut *svc.mapper, &mut *svc.stack, &mut *svc.store);

            // Presentation-only invalidation: a blink phase flip redraws
            // even though no data changed.
            let phase = (now / EDIT_BLINK_MS) % 2 == 1;
            if phase != self.blink_on {
                self.blink_on = phase;
                self.base.mark_dirty();
            }
        } else {
            self.base.handle_browse(now, &mut *svc.mapper, &mut *svc.stack);
            if self.blink_on {
                self.blink_on = false;
                self.base.mark_dirty();
            }
        }

        let (editing, blink) = (self.editing, self.blink_on);
        self.base.draw_if_dirty(svc.renderer, editing, blink);

        let idx = self.base.activated.take()?;
        let it = self.base.item(idx)?;
        if let Some(child) = it.submenu {
            // Child link wins over edit mode.
            let _ = svc.stack.push(child);
            svc.stack.lock_for(now, PUSH_LOCK_MS);
            None
        } else if it.edit.kind() != EditKind::None {
            self.editing = true;
            self.base.mark_dirty();
            None
        } else {
            Some(idx)
        }
    }

    fn handle_edit(
        &mut self,
        now: u64,
        controls: &mut InputMapper,
        stack: &mut MenuStack,
        store: &mut dyn SettingsStore,
    ) {
        if stack.locked(now) {
            return;
        }

        // Only the left/right pair adjusts values, in every orientation.
        let d = if controls.left() {
            -1
        } else if controls.right() {
            1
        } else {
            0
        };
        if self.edit.step(now, d, &self.base.settings) {
            self.adjust(now, d, store);
        }

        if controls.confirm_pressed() {
            self.editing = false;
            self.base.mark_dirty();
            controls.consume_confirm();
        }
        if controls.back_pressed() {
            // No rollback: the value was committed as it was adjusted.
            self.editing = false;
            self.base.mark_dirty();
            controls.consume_back();
        }
    }

    fn adjust(&mut self, now: u64, dir: i8, store: &mut dyn SettingsStore) {
        let sel = self.base.selected();
        let Some(it) = self.base.item_mut(sel) else {
            return;
        };
        let old = it.value();
        let new = it.adjust(dir);
        let hook = it.on_change;
        self.base.mark_dirty();

        if new != old {
            if let Some(hook) = hook {
                hook(new);
            }
        }

        // Throttled autosave: rapid adjustments inside the window coalesce
        // into the next qualifying write.
        if self.autosave && now.wrapping_sub(self.last_save) > AUTOSAVE_THROTTLE_MS {
            if !save_menu_settings(&self.base, store, self.save_path.as_str()) {
                warn!("menu: autosave to {} failed", self.save_path.as_str());
            }
            self.last_save = now;
        }
    }
}

impl Default for EditMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for EditMenu {
    type Target = Menu;

    fn deref(&self) -> &Menu {
        &self.base
    }
}

impl DerefMut for EditMenu {
    fn deref_mut(&mut self) -> &mut Menu {
        &mut self.base
    }
}

fn path_of(path: &str) -> String<MAX_PATH_LEN> {
    let mut s: String<MAX_PATH_LEN> = String::new();
    for c in path.chars() {
        if s.push(c).is_err() {
            break;
        }
    }
    s
}
