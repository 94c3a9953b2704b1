//! Settings persistence bridge.
//!
//! Menus serialize to a flat item-index -> integer document; both RANGE
//! and ARRAY values are integers, so the round-trip is lossless. The
//! actual resource (SD card file, flash page, RAM) sits behind the
//! [`SettingsStore`] trait, and failures are soft: the caller falls back
//! to compiled-in defaults on load and simply skips a failed save.

use heapless::{FnvIndexMap, String, Vec};
use log::{info, warn};

use crate::config::{MAX_MENU_ITEMS, MAX_PATH_LEN};
use crate::error::Error;
use crate::menu::Menu;

/// Flat mapping from item index to stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDoc {
    entries: Vec<(usize, i64), MAX_MENU_ITEMS>,
}

impl SettingsDoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `idx`. Silently ignored past
    /// capacity (a menu can never produce more entries than it has items).
    pub fn set(&mut self, idx: usize, value: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|(i, _)| *i == idx) {
            entry.1 = value;
        } else {
            let _ = self.entries.push((idx, value));
        }
    }

    pub fn get(&self, idx: usize) -> Option<i64> {
        self.entries.iter().find(|(i, _)| *i == idx).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Named persisted resource exchanging [`SettingsDoc`]s.
pub trait SettingsStore {
    fn save(&mut self, path: &str, doc: &SettingsDoc) -> Result<(), Error>;
    fn load(&mut self, path: &str) -> Result<SettingsDoc, Error>;
}

/// Serialize every current item value of `menu` to `path`.
/// Returns false (and changes nothing) when the store rejects the write.
pub fn save_menu_settings(menu: &Menu, store: &mut dyn SettingsStore, path: &str) -> bool {
    let mut doc = SettingsDoc::new();
    for i in 0..menu.len() {
        doc.set(i, menu.item_value(i));
    }
    match store.save(path, &doc) {
        Ok(()) => true,
        Err(e) => {
            warn!("settings: save to {} failed: {:?}", path, e);
            false
        }
    }
}

/// Populate `menu` from `path`. Items whose index is present get their
/// value set (clamped into the item's domain); unmatched items are left
/// untouched. Returns false when the resource is missing or malformed.
pub fn load_menu_settings(menu: &mut Menu, store: &mut dyn SettingsStore, path: &str) -> bool {
    let doc = match store.load(path) {
        Ok(doc) => doc,
        Err(e) => {
            info!("settings: load from {} failed: {:?}", path, e);
            return false;
        }
    };
    for (idx, value) in doc.iter() {
        menu.set_item_value(idx, value);
    }
    true
}

/// In-memory store keyed by path. The no_std default backend; also the
/// test double for the throttling and round-trip scenarios.
pub struct MemStore {
    files: FnvIndexMap<String<MAX_PATH_LEN>, SettingsDoc, 4>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            files: FnvIndexMap::new(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        key_of(path).map_or(false, |k| self.files.contains_key(&k))
    }
}

impl SettingsStore for MemStore {
    fn save(&mut self, path: &str, doc: &SettingsDoc) -> Result<(), Error> {
        let key = key_of(path).ok_or(Error::Storage)?;
        self.files.insert(key, doc.clone()).map_err(|_| Error::Storage)?;
        Ok(())
    }

    fn load(&mut self, path: &str) -> Result<SettingsDoc, Error> {
        let key = key_of(path).ok_or(Error::Storage)?;
        self.files.get(&key).cloned().ok_or(Error::Storage)
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

fn key_of(path: &str) -> Option<String<MAX_PATH_LEN>> {
    let mut s: String<MAX_PATH_LEN> = String::new();
    s.push_str(path).ok()?;
    Some(s)
}

#[cfg(feature = "std")]
pub use json_file::JsonFileStore;

#[cfg(feature = "std")]
mod json_file {
    //! JSON file-backed store: the settings document as an object with
    //! decimal-string keys, e.g. `{"0": 75, "1": 2}`.

    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{SettingsDoc, SettingsStore};
    use crate::error::Error;

    /// Stores settings documents as pretty-printed JSON files under a
    /// root directory (the SD-card mount point stand-in).
    pub struct JsonFileStore {
        root: PathBuf,
    }

    impl JsonFileStore {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        fn resolve(&self, path: &str) -> PathBuf {
            self.root.join(Path::new(path.trim_start_matches('/')))
        }
    }

    impl SettingsStore for JsonFileStore {
        fn save(&mut self, path: &str, doc: &SettingsDoc) -> Result<(), Error> {
            let mut map = serde_json::Map::new();
            for (idx, value) in doc.iter() {
                map.insert(idx.to_string(), serde_json::Value::from(value));
            }
            let text = serde_json::to_vec_pretty(&serde_json::Value::Object(map))
                .map_err(|_| Error::Codec)?;
            fs::write(self.resolve(path), text).map_err(|_| Error::Storage)
        }

        fn load(&mut self, path: &str) -> Result<SettingsDoc, Error> {
            let bytes = fs::read(self.resolve(path)).map_err(|_| Error::Storage)?;
            let value: serde_json::Value =
                serde_json::from_slice(&bytes).map_err(|_| Error::Codec)?;
            let map = value.as_object().ok_or(Error::Codec)?;

            let mut doc = SettingsDoc::new();
            for (key, value) in map {
                if let (Ok(idx), Some(v)) = (key.parse::<usize>(), value.as_i64()) {
                    doc.set(idx, v);
                }
            }
            Ok(doc)
        }
    }
}
