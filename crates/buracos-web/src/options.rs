//! Option objects handed to Leaflet and the Geolocation API

use buracos_core::render::MarkerStyle;
use serde::Serialize;

/// `L.circleMarker` options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMarkerOptions {
    pub color: &'static str,
    pub radius: u32,
    /// Keep marker clicks from also reaching the map's click handler
    pub bubbling_mouse_events: bool,
}

impl From<MarkerStyle> for CircleMarkerOptions {
    fn from(style: MarkerStyle) -> Self {
        Self {
            color: style.color,
            radius: style.radius,
            bubbling_mouse_events: false,
        }
    }
}

/// `PositionOptions` for `getCurrentPosition`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    /// Milliseconds before the error callback fires
    pub timeout: u32,
    pub maximum_age: u32,
}

impl GeolocationOptions {
    pub const fn with_timeout(timeout: u32) -> Self {
        Self {
            enable_high_accuracy: false,
            timeout,
            maximum_age: 0,
        }
    }
}
