//! Marker registry
//!
//! Owns the ordered marker collection, applies the voting rules, and writes
//! the whole collection back to storage after every mutation.

use crate::error::{Error, Result};
use crate::models::{Marker, MarkerId, Severity};
use crate::store::{KeyValueStore, PersistentStore};

/// Marker counts for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerSummary {
    pub total: usize,
    pub active: usize,
    pub resolved: usize,
    /// Active markers per tier: low, medium, high
    pub active_by_severity: [usize; 3],
}

/// In-memory marker collection with write-through persistence
pub struct MarkerRegistry<S> {
    markers: Vec<Marker>,
    store: PersistentStore<S>,
}

impl<S: KeyValueStore> MarkerRegistry<S> {
    /// Load the collection from `store`; unreadable data starts empty
    pub fn load(store: PersistentStore<S>) -> Self {
        let markers = store.load();
        tracing::info!("Loaded {} markers from '{}'", markers.len(), store.key());
        Self { markers, store }
    }

    /// Append a new active marker and persist
    pub fn create(&mut self, lat: f64, lng: f64, severity: Severity) -> Result<Marker> {
        let marker = Marker::new(lat, lng, severity);
        self.markers.push(marker.clone());
        tracing::info!(
            "Created {} marker {} at ({}, {})",
            severity,
            marker.id,
            lat,
            lng
        );
        self.persist()?;
        Ok(marker)
    }

    /// Upvote the marker at `index`
    pub fn upvote(&mut self, index: usize) -> Result<Marker> {
        self.mutate_at(index, Marker::upvote)
    }

    /// Downvote the marker at `index`, resolving it at the threshold
    pub fn downvote(&mut self, index: usize) -> Result<Marker> {
        self.mutate_at(index, Marker::downvote)
    }

    /// Upvote the marker with the given id
    pub fn upvote_by_id(&mut self, id: MarkerId) -> Result<Marker> {
        let index = self.position(id).ok_or(Error::MarkerNotFound(id))?;
        self.upvote(index)
    }

    /// Downvote the marker with the given id
    pub fn downvote_by_id(&mut self, id: MarkerId) -> Result<Marker> {
        let index = self.position(id).ok_or(Error::MarkerNotFound(id))?;
        self.downvote(index)
    }

    /// Markers in insertion order
    pub fn list(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    /// Current index of the marker with the given id
    pub fn position(&self, id: MarkerId) -> Option<usize> {
        self.markers.iter().position(|marker| marker.id == id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn summary(&self) -> MarkerSummary {
        self.markers
            .iter()
            .fold(MarkerSummary::default(), |mut summary, marker| {
                summary.total += 1;
                if marker.is_active() {
                    summary.active += 1;
                    if let Some(tier) = marker.severity.tier() {
                        summary.active_by_severity[tier as usize] += 1;
                    }
                } else {
                    summary.resolved += 1;
                }
                summary
            })
    }

    /// Backing store, for inspection
    pub const fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    fn mutate_at(&mut self, index: usize, apply: impl FnOnce(&mut Marker)) -> Result<Marker> {
        let len = self.markers.len();
        let marker = self
            .markers
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })?;
        apply(marker);
        let updated = marker.clone();
        tracing::debug!(
            "Marker {} now {}/{} votes, {}",
            updated.id,
            updated.upvotes,
            updated.downvotes,
            updated.status
        );
        self.persist()?;
        Ok(updated)
    }

    /// The in-memory change stays applied when the write fails.
    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.markers).inspect_err(|e| {
            tracing::error!("Failed to persist markers: {}", e);
        })
    }
}
