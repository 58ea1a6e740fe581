//! Map controller
//!
//! Glues the registry to an interactive map widget. Every user interaction
//! arrives as a [`MapEvent`] through an [`EventSink`]; the host feeds queued
//! events to [`MapController::handle`] one at a time, so each runs to
//! completion before the next starts.

use std::rc::Rc;

use crate::config::{MapConfig, TileLayerOptions};
use crate::error::{Error, Result};
use crate::models::{LatLng, Marker, MarkerId, Severity};
use crate::registry::MarkerRegistry;
use crate::render::{self, MarkerStyle, Popup};
use crate::store::{KeyValueStore, PersistentStore};

#[cfg(test)]
mod tests;

/// Something the user (or the browser) did
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The user's position was obtained
    Located(LatLng),
    /// Geolocation failed, was denied, timed out or does not exist
    LocationUnavailable,
    /// The map was clicked at a position
    Clicked(LatLng),
    /// A severity was picked in the popup opened by a click
    SeverityChosen { position: LatLng, severity: Severity },
    Upvote(MarkerId),
    Downvote(MarkerId),
}

/// Callback receiving events from the widget and the geolocator
pub type EventSink = Rc<dyn Fn(MapEvent)>;

/// Interactive map capability
pub trait MapWidget {
    /// Handle to a rendered marker
    type Marker;

    fn create_map(&mut self, center: LatLng, zoom: u8) -> Result<()>;

    fn add_tile_layer(&mut self, url: &str, options: &TileLayerOptions) -> Result<()>;

    /// Route map clicks to `sink` as [`MapEvent::Clicked`].
    ///
    /// Popup actions are delivered to the same sink.
    fn on_click(&mut self, sink: EventSink) -> Result<()>;

    /// Draw a circle marker with a bound popup
    fn add_point_marker(
        &mut self,
        position: LatLng,
        style: MarkerStyle,
        popup: Popup,
    ) -> Result<Self::Marker>;

    fn remove_marker(&mut self, marker: Self::Marker);

    /// Open a standalone popup at `position`
    fn show_popup(&mut self, position: LatLng, content: Popup) -> Result<()>;

    fn close_popup(&mut self);
}

/// Source of the user's position.
///
/// Must eventually emit exactly one of [`MapEvent::Located`] or
/// [`MapEvent::LocationUnavailable`] to the sink, and must not block.
pub trait Geolocator {
    fn locate(&self, sink: EventSink);
}

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the geolocation answer; the map does not exist yet
    AwaitingLocation,
    /// Map created and markers rendered
    Ready,
}

/// Orchestrates the registry and the map widget
pub struct MapController<W: MapWidget, S> {
    config: MapConfig,
    registry: MarkerRegistry<S>,
    widget: W,
    sink: EventSink,
    phase: Phase,
    rendered: Vec<W::Marker>,
}

impl<W: MapWidget, S: KeyValueStore> MapController<W, S> {
    /// Validate the config and load the stored markers
    pub fn new(config: MapConfig, store: S, widget: W, sink: EventSink) -> Result<Self> {
        config.validate()?;
        let registry = MarkerRegistry::load(PersistentStore::with_key(store, &config.storage_key));
        Ok(Self {
            config,
            registry,
            widget,
            sink,
            phase: Phase::AwaitingLocation,
            rendered: Vec::new(),
        })
    }

    /// Ask for the user's position; the answer arrives as an event
    pub fn start(&self, geolocator: &impl Geolocator) {
        tracing::info!("Requesting current position");
        geolocator.locate(Rc::clone(&self.sink));
    }

    /// Apply one event
    pub fn handle(&mut self, event: MapEvent) -> Result<()> {
        match (self.phase, event) {
            (Phase::AwaitingLocation, MapEvent::Located(position)) => {
                tracing::info!("Centering map on user position {}", position);
                self.initialize(position)
            }
            (Phase::AwaitingLocation, MapEvent::LocationUnavailable) => {
                tracing::info!(
                    "Location unavailable, centering on fallback {}",
                    self.config.fallback_center
                );
                self.initialize(self.config.fallback_center)
            }
            (Phase::Ready, event @ (MapEvent::Located(_) | MapEvent::LocationUnavailable)) => {
                tracing::debug!("Ignoring late location event {:?}", event);
                Ok(())
            }
            (Phase::AwaitingLocation, event) => {
                tracing::warn!("Ignoring {:?} before the map is ready", event);
                Ok(())
            }
            (Phase::Ready, MapEvent::Clicked(position)) => {
                let position = position.wrapped();
                self.widget
                    .show_popup(position, render::severity_picker(position))
            }
            (Phase::Ready, MapEvent::SeverityChosen { position, severity }) => {
                let created = self.registry.create(position.lat, position.lng, severity);
                self.widget.close_popup();
                self.after_mutation(created)
            }
            (Phase::Ready, MapEvent::Upvote(id)) => {
                let voted = self.registry.upvote_by_id(id);
                self.after_mutation(voted)
            }
            (Phase::Ready, MapEvent::Downvote(id)) => {
                let voted = self.registry.downvote_by_id(id);
                self.after_mutation(voted)
            }
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn registry(&self) -> &MarkerRegistry<S> {
        &self.registry
    }

    pub const fn widget(&self) -> &W {
        &self.widget
    }

    fn initialize(&mut self, center: LatLng) -> Result<()> {
        self.widget.create_map(center, self.config.zoom)?;
        self.widget
            .add_tile_layer(&self.config.tile_url, &self.config.tile_layer_options())?;
        self.widget.on_click(Rc::clone(&self.sink))?;
        self.phase = Phase::Ready;
        self.render()
    }

    /// Re-render unless the operation left the collection untouched.
    ///
    /// A failed write still changed the collection, so the map follows it.
    fn after_mutation(&mut self, outcome: Result<Marker>) -> Result<()> {
        match outcome {
            Ok(_) => self.render(),
            Err(e @ Error::Storage(_)) => {
                self.render()?;
                Err(e)
            }
            Err(e) => {
                tracing::error!("Rendered markers are out of sync with the collection: {}", e);
                Err(e)
            }
        }
    }

    /// Replace every rendered marker with the current collection
    fn render(&mut self) -> Result<()> {
        for marker in self.rendered.drain(..) {
            self.widget.remove_marker(marker);
        }
        for marker in self.registry.list() {
            let handle = self.widget.add_point_marker(
                marker.position(),
                render::marker_style(marker),
                render::marker_popup(marker),
            )?;
            self.rendered.push(handle);
        }
        tracing::debug!("Rendered {} markers", self.rendered.len());
        Ok(())
    }
}
