//! Menu item model - labels, editable values, submenu links.

use heapless::String;

use crate::config::{MAX_LABEL_LEN, MAX_PATH_LEN};
use crate::menu::stack::MenuId;

/// Kind of in-place editing an item supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditKind {
    None,
    Range,
    Array,
}

/// Bounded numeric value stepped by a fixed increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRange {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub value: i64,
}

/// Fixed-choice value; the selected index wraps circularly when adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditArray {
    pub choices: &'static [&'static str],
    pub index: usize,
}

impl EditArray {
    /// Currently selected choice text, if any choices exist.
    pub fn selected(&self) -> Option<&'static str> {
        self.choices.get(self.index).copied()
    }
}

/// Editable payload of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSpec {
    None,
    Range(EditRange),
    Array(EditArray),
}

impl EditSpec {
    pub fn kind(&self) -> EditKind {
        match self {
            EditSpec::None => EditKind::None,
            EditSpec::Range(_) => EditKind::Range,
            EditSpec::Array(_) => EditKind::Array,
        }
    }
}

/// Icon flavor, opaque to the core (the renderer decides what to do
/// with the path and dimensions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IconKind {
    #[default]
    None,
    Mono,
    Color,
}

/// Per-item change hook, fired when an adjustment changed the value.
pub type ChangeHook = fn(i64);

/// A single visible item in a menu.
#[derive(Clone)]
pub struct MenuItem {
    pub label: String<MAX_LABEL_LEN>,
    pub enabled: bool,
    pub edit: EditSpec,

    /// Non-owning link to a child menu in the application's menu table.
    pub submenu: Option<MenuId>,

    /// Fired with the new value after a successful adjust.
    pub on_change: Option<ChangeHook>,

    // Renderer passthrough
    pub icon: IconKind,
    pub icon_path: String<MAX_PATH_LEN>,
    pub icon_w: i16,
    pub icon_h: i16,
}

impl MenuItem {
    /// Static label item (not editable).
    pub fn label(text: &str) -> Self {
        Self {
            label: truncated(text),
            enabled: true,
            edit: EditSpec::None,
            submenu: None,
            on_change: None,
            icon: IconKind::None,
            icon_path: String::new(),
            icon_w: 0,
            icon_h: 0,
        }
    }

    /// Bounded numeric item. The initial value is clamped into [min, max].
    pub fn range(text: &str, value: i64, min: i64, max: i64, step: i64) -> Self {
        let mut it = Self::label(text);
        it.edit = EditSpec::Range(EditRange {
            min,
            max,
            step,
            value: value.clamp(min, max),
        });
        it
    }

    /// Fixed-choice item. The initial index is clamped to the choice count.
    pub fn array(text: &str, choices: &'static [&'static str], index: usize) -> Self {
        let mut it = Self::label(text);
        let index = if choices.is_empty() {
            0
        } else {
            index.min(choices.len() - 1)
        };
        it.edit = EditSpec::Array(EditArray { choices, index });
        it
    }

    pub fn with_submenu(mut self, id: MenuId) -> Self {
        self.submenu = Some(id);
        self
    }

    pub fn with_on_change(mut self, hook: ChangeHook) -> Self {
        self.on_change = Some(hook);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_icon(mut self, kind: IconKind, path: &str, w: i16, h: i16) -> Self {
        self.icon = kind;
        self.icon_path = truncated(path);
        self.icon_w = w;
        self.icon_h = h;
        self
    }

    pub fn set_label(&mut self, text: &str) {
        self.label = truncated(text);
    }

    /// Current value: range value, array index, or 0 for plain labels.
    pub fn value(&self) -> i64 {
        match &self.edit {
            EditSpec::Range(r) => r.value,
            EditSpec::Array(a) => a.index as i64,
            EditSpec::None => 0,
        }
    }

    /// Set the stored value, clamped into the item's valid domain.
    /// No-op for plain labels.
    pub fn set_value(&mut self, v: i64) {
        match &mut self.edit {
            EditSpec::Range(r) => r.value = v.clamp(r.min, r.max),
            EditSpec::Array(a) => {
                if !a.choices.is_empty() {
                    a.index = v.clamp(0, a.choices.len() as i64 - 1) as usize;
                }
            }
            EditSpec::None => {}
        }
    }

    /// Apply one signed adjust step. Ranges clamp, arrays wrap.
    /// Returns the value after the adjust.
    pub(crate) fn adjust(&mut self, dir: i8) -> i64 {
        match &mut self.edit {
            EditSpec::Range(r) => {
                r.value = (r.value + r.step * dir as i64).clamp(r.min, r.max);
            }
            EditSpec::Array(a) => {
                let n = a.choices.len();
                if n > 0 {
                    a.index = (a.index as i64 + dir as i64).rem_euclid(n as i64) as usize;
                }
            }
            EditSpec::None => {}
        }
        self.value()
    }
}

/// Copy `text` into a bounded string, truncating past capacity.
fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut s: String<N> = String::new();
    for c in text.chars() {
        if s.push(c).is_err() {
            break;
        }
    }
    s
}
