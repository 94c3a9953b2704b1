//! menukit - a menu/UI framework for handheld devices.
//!
//! Renders navigable menus (vertical list or horizontal carousel),
//! normalizes gamepad / mechanical-button / touch input into one
//! edge-triggered model, supports in-place editing of numeric and
//! enumerated settings, and persists item values through a pluggable
//! settings store.
//!
//! The core is single-threaded and poll-driven: the application's main
//! loop calls `update(now, &mut services)` on the current menu once per
//! tick with a monotonic millisecond counter. All hardware sits behind
//! traits ([`input::InputSource`], [`gamepad::PadTransport`],
//! [`menu::MenuRenderer`], [`persist::SettingsStore`]), so the whole
//! crate compiles and tests on the host.
//!
//! ```
//! use menukit::input::{InputMapper, NullInput};
//! use menukit::menu::{EditMenu, MenuId, MenuItem, MenuStack, NullRenderer, Services};
//! use menukit::persist::MemStore;
//!
//! let mut menu = EditMenu::new();
//! menu.add_item(MenuItem::range("Brightness", 75, 0, 100, 5)).unwrap();
//!
//! let mut mapper = InputMapper::new();
//! let mut stack = MenuStack::new();
//! stack.set_root(MenuId(0));
//! let mut renderer = NullRenderer;
//! let mut store = MemStore::new();
//!
//! // One tick of the main loop:
//! let activated = menu.update(
//!     16,
//!     &mut Services {
//!         mapper: &mut mapper,
//!         input: &NullInput,
//!         renderer: &mut renderer,
//!         store: &mut store,
//!         stack: &mut stack,
//!     },
//! );
//! assert_eq!(activated, None);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod config;
pub mod error;
pub mod gamepad;
pub mod input;
pub mod menu;
pub mod persist;

pub use error::Error;
pub use gamepad::{GamepadSource, GamepadState, PadTransport, PairingPhase, StatusLed};
pub use input::{ButtonId, InputMapper, InputMode, InputSource, NullInput};
pub use menu::{
    EditKind, EditMenu, Menu, MenuId, MenuItem, MenuRenderer, MenuSettings, MenuStack, MenuTheme,
    Orientation, Services,
};
pub use persist::{load_menu_settings, save_menu_settings, MemStore, SettingsDoc, SettingsStore};
