//! Persistence of the marker collection in a local key-value store

mod memory;
mod record;

pub use memory::MemoryStore;

use crate::error::{Error, Result};
use crate::models::Marker;
use record::MarkerRecord;

/// Key under which the collection is stored
pub const STORAGE_KEY: &str = "buracos";

/// String key-value storage, shaped after the browser's `localStorage`
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Whole-collection persistence under a single key
pub struct PersistentStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistentStore<S> {
    /// Create a store using the default `"buracos"` key
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Create a store using a custom key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying key-value store
    pub const fn inner(&self) -> &S {
        &self.store
    }

    /// Serialize the full collection and overwrite the stored value
    pub fn save(&mut self, markers: &[Marker]) -> Result<()> {
        let records: Vec<MarkerRecord> = markers.iter().map(MarkerRecord::from).collect();
        let payload = serde_json::to_string(&records)?;
        self.store.set_item(&self.key, &payload)?;
        tracing::debug!("Saved {} markers under '{}'", markers.len(), self.key);
        Ok(())
    }

    /// Load the collection.
    ///
    /// Never fails: an absent key, an unreadable store or a payload that does
    /// not decode all yield an empty collection.
    pub fn load(&self) -> Vec<Marker> {
        match self.try_load() {
            Ok(markers) => markers,
            Err(e) => {
                tracing::warn!("Discarding stored markers under '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<Marker>> {
        let Some(payload) = self.store.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        let records: Vec<MarkerRecord> = serde_json::from_str(&payload)?;
        records
            .into_iter()
            .map(MarkerRecord::into_marker)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Storage)
    }
}
