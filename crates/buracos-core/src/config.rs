//! Map configuration
//!
//! Everything the controller needs to bring the map up: where to center when
//! the user's location is unknown, which tiles to draw, and where markers are
//! stored.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::LatLng;
use crate::store::STORAGE_KEY;
use crate::util::is_http_url;

/// São Paulo, used when geolocation is unavailable
pub const FALLBACK_CENTER: LatLng = LatLng::new(-23.55052, -46.633308);

const DEFAULT_ZOOM: u8 = 13;
const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_TILE_MAX_ZOOM: u8 = 19;
const DEFAULT_TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
const DEFAULT_GEOLOCATION_TIMEOUT_MS: u32 = 10_000;

/// Options passed to the tile layer, named the way map widgets expect them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerOptions {
    pub max_zoom: u8,
    pub attribution: String,
}

/// Map and storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    /// Center used when the user's position is unknown
    pub fallback_center: LatLng,
    /// Initial zoom level
    pub zoom: u8,
    /// Tile URL template
    pub tile_url: String,
    pub tile_max_zoom: u8,
    pub tile_attribution: String,
    /// `localStorage` key holding the marker collection
    pub storage_key: String,
    /// How long to wait for a position before falling back
    pub geolocation_timeout_ms: u32,
    /// DOM id of the element hosting the map
    pub container_id: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            fallback_center: FALLBACK_CENTER,
            zoom: DEFAULT_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_max_zoom: DEFAULT_TILE_MAX_ZOOM,
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            storage_key: STORAGE_KEY.to_string(),
            geolocation_timeout_ms: DEFAULT_GEOLOCATION_TIMEOUT_MS,
            container_id: "map".to_string(),
        }
    }
}

impl MapConfig {
    /// Reject settings the map widget cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.fallback_center.is_valid() {
            return Err(Error::InvalidInput(format!(
                "fallback_center {} is not a valid coordinate",
                self.fallback_center
            )));
        }
        if self.tile_max_zoom == 0 || self.zoom > self.tile_max_zoom {
            return Err(Error::InvalidInput(format!(
                "zoom {} must be within 0..={} and tile_max_zoom must be positive",
                self.zoom, self.tile_max_zoom
            )));
        }
        if !is_http_url(self.tile_url.trim()) {
            return Err(Error::InvalidInput(
                "tile_url must include http:// or https://".to_string(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(Error::InvalidInput("storage_key must not be empty".to_string()));
        }
        if self.container_id.trim().is_empty() {
            return Err(Error::InvalidInput("container_id must not be empty".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn tile_layer_options(&self) -> TileLayerOptions {
        TileLayerOptions {
            max_zoom: self.tile_max_zoom,
            attribution: self.tile_attribution.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage_key, "buracos");
        assert_eq!(config.fallback_center, FALLBACK_CENTER);
        assert_eq!(config.zoom, 13);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_center = MapConfig {
            fallback_center: LatLng::new(100.0, 0.0),
            ..MapConfig::default()
        };
        assert!(bad_center.validate().is_err());

        let bad_zoom = MapConfig {
            zoom: 20,
            ..MapConfig::default()
        };
        assert!(bad_zoom.validate().is_err());

        let bad_url = MapConfig {
            tile_url: "tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            ..MapConfig::default()
        };
        assert!(bad_url.validate().is_err());

        let bad_key = MapConfig {
            storage_key: "  ".to_string(),
            ..MapConfig::default()
        };
        assert!(bad_key.validate().is_err());
    }

    #[test]
    fn test_tile_layer_options_use_widget_names() {
        let json = serde_json::to_string(&MapConfig::default().tile_layer_options()).unwrap();
        assert_eq!(
            json,
            r#"{"maxZoom":19,"attribution":"&copy; OpenStreetMap contributors"}"#
        );
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let mut value = serde_json::to_value(MapConfig::default()).unwrap();
        value["unexpected"] = serde_json::json!(true);
        let error = serde_json::from_value::<MapConfig>(value).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }
}
