//! Menu subsystem - item model, navigation, editing, stack, rendering seam.
//!
//! ## Components
//!
//! - [`MenuItem`] / [`EditSpec`]: the per-item data model
//! - [`Menu`]: navigation state machine (selection, scroll, repeat, dirty)
//! - [`EditMenu`]: adds the edit sub-state, change hooks and autosave
//! - [`MenuStack`]: push/pop of nested menus via non-owning handles
//! - [`MenuRenderer`]: the external draw boundary

pub mod base;
pub mod edit;
pub mod item;
pub mod render;
pub mod repeat;
pub mod stack;
pub mod theme;

pub use base::Menu;
pub use edit::EditMenu;
pub use item::{ChangeHook, EditArray, EditKind, EditRange, EditSpec, IconKind, MenuItem};
pub use render::{MenuFrame, MenuRenderer, NullRenderer};
pub use repeat::MenuSettings;
pub use stack::{MenuId, MenuStack};
pub use theme::{MenuTheme, Orientation, TransitionStyle};

use crate::input::{InputMapper, InputSource};
use crate::persist::SettingsStore;

/// Per-tick collaborators, owned by the application's main loop and
/// injected into every menu update (no process-wide singletons).
pub struct Services<'a> {
    pub mapper: &'a mut InputMapper,
    pub input: &'a dyn InputSource,
    pub renderer: &'a mut dyn MenuRenderer,
    pub store: &'a mut dyn SettingsStore,
    pub stack: &'a mut MenuStack,
}
