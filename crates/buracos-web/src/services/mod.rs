//! Browser services
//!
//! Adapters implementing the core capabilities on top of browser APIs.

mod geolocation;
mod leaflet;
mod local_storage;
mod popup_dom;

pub use geolocation::BrowserGeolocator;
pub use leaflet::LeafletMap;
pub use local_storage::BrowserStore;
