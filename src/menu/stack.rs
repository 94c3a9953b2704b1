//! Menu stack - nested menu navigation via non-owning handles.
//!
//! Menus live in an application-owned table; the stack only tracks which
//! handle is current. Index 0 is the root and can never be popped. The
//! stack also owns the shared input lock that suppresses early repeat
//! when focus moves between menus.

use heapless::Vec;
use log::debug;

use crate::config::MAX_MENU_DEPTH;
use crate::error::Error;

/// Non-owning handle into the application's menu table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuId(pub usize);

/// Push/pop ownership of the active menu.
pub struct MenuStack {
    stack: Vec<MenuId, MAX_MENU_DEPTH>,
    lock_until: u64,
    top_dirty: bool,
}

impl MenuStack {
    pub const fn new() -> Self {
        Self {
            stack: Vec::new(),
            lock_until: 0,
            top_dirty: false,
        }
    }

    /// Reset the stack to contain exactly `root`.
    pub fn set_root(&mut self, root: MenuId) {
        self.stack.clear();
        let _ = self.stack.push(root);
        self.top_dirty = true;
    }

    /// Append a submenu and force a redraw of it on the next update.
    pub fn push(&mut self, id: MenuId) -> Result<(), Error> {
        self.stack.push(id).map_err(|_| Error::StackFull)?;
        debug!("menu: push -> depth {}", self.stack.len());
        self.top_dirty = true;
        Ok(())
    }

    /// Remove the top menu and return the newly current one.
    /// The root is unpoppable: depth 1 is a no-op returning `None`.
    pub fn pop(&mut self) -> Option<MenuId> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop();
        debug!("menu: pop -> depth {}", self.stack.len());
        self.top_dirty = true;
        self.stack.last().copied()
    }

    /// Top of the stack, if any.
    pub fn current(&self) -> Option<MenuId> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    // Input lock

    /// Suppress menu input until `now + ms`.
    pub fn lock_for(&mut self, now: u64, ms: u64) {
        self.lock_until = now + ms;
    }

    pub fn locked(&self, now: u64) -> bool {
        now < self.lock_until
    }

    /// Consume the deferred "new top needs a redraw" flag. The current
    /// menu's update calls this at the top of every tick.
    pub(crate) fn take_top_dirty(&mut self) -> bool {
        let d = self.top_dirty;
        self.top_dirty = false;
        d
    }
}

impl Default for MenuStack {
    fn default() -> Self {
        Self::new()
    }
}
