//! `localStorage`-backed key-value store

use buracos_core::error::Result;
use buracos_core::store::{KeyValueStore, MemoryStore};
use web_sys::Storage;

use crate::error::WebError;

/// Marker storage for the browser.
///
/// Uses `window.localStorage` when the browser grants it; otherwise keeps
/// markers in memory for the lifetime of the page.
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match local_storage() {
            Ok(storage) => Self::Local(storage),
            Err(e) => {
                tracing::warn!("{}; markers will not survive a reload", e);
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

fn local_storage() -> std::result::Result<Storage, WebError> {
    let window = web_sys::window().ok_or(WebError::Unavailable("window"))?;
    window
        .local_storage()?
        .ok_or(WebError::Unavailable("localStorage"))
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Local(storage) => storage
                .get_item(key)
                .map_err(|e| WebError::from(e).into_storage()),
            Self::Memory(store) => store.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Local(storage) => storage
                .set_item(key, value)
                .map_err(|e| WebError::from(e).into_storage()),
            Self::Memory(store) => store.set_item(key, value),
        }
    }
}
