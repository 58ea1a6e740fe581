//! Leaflet map widget
//!
//! Minimal bindings to the global `L` object loaded by the page, wrapped in a
//! `MapWidget` implementation.

use std::rc::Rc;

use buracos_core::config::TileLayerOptions;
use buracos_core::controller::{EventSink, MapEvent, MapWidget};
use buracos_core::error::Result;
use buracos_core::render::{MarkerStyle, Popup as PopupContent};
use buracos_core::LatLng;
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;

use super::popup_dom::{build_popup, Listener};
use crate::error::WebError;
use crate::options::CircleMarkerOptions;

#[wasm_bindgen]
extern "C" {
    type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn new_map(container_id: &str) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &Array, zoom: u8) -> Map;

    #[wasm_bindgen(method)]
    fn on(this: &Map, event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Map;

    #[wasm_bindgen(method, js_name = closePopup)]
    fn close_popup(this: &Map) -> Map;

    type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    fn circle_marker(position: &Array, options: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &web_sys::HtmlElement) -> Layer;

    #[wasm_bindgen(method)]
    fn remove(this: &Layer) -> Layer;

    type Popup;

    #[wasm_bindgen(js_namespace = L, js_name = popup)]
    fn new_popup() -> Popup;

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &Popup, position: &Array) -> Popup;

    #[wasm_bindgen(method, js_name = setContent)]
    fn set_content(this: &Popup, content: &web_sys::HtmlElement) -> Popup;

    #[wasm_bindgen(method, js_name = openOn)]
    fn open_on(this: &Popup, map: &Map) -> Popup;
}

/// A circle marker on the map and the listeners of its popup buttons
pub struct LeafletMarker {
    layer: Layer,
    _listeners: Vec<Listener>,
}

/// Leaflet-backed `MapWidget`
pub struct LeafletMap {
    container_id: String,
    map: Option<Map>,
    sink: Option<EventSink>,
    click_handler: Option<Closure<dyn FnMut(JsValue)>>,
    /// Listeners of the standalone popup currently open
    popup_listeners: Vec<Listener>,
}

impl LeafletMap {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            map: None,
            sink: None,
            click_handler: None,
            popup_listeners: Vec::new(),
        }
    }

    fn map(&self) -> std::result::Result<&Map, WebError> {
        self.map.as_ref().ok_or(WebError::Unavailable("map not created"))
    }
}

fn lat_lng_array(position: LatLng) -> Array {
    Array::of2(&JsValue::from_f64(position.lat), &JsValue::from_f64(position.lng))
}

/// Read `event.latlng.{lat,lng}` from a Leaflet mouse event
fn event_position(event: &JsValue) -> Option<LatLng> {
    let latlng = Reflect::get(event, &JsValue::from_str("latlng")).ok()?;
    let lat = Reflect::get(&latlng, &JsValue::from_str("lat")).ok()?.as_f64()?;
    let lng = Reflect::get(&latlng, &JsValue::from_str("lng")).ok()?.as_f64()?;
    Some(LatLng::new(lat, lng))
}

impl MapWidget for LeafletMap {
    type Marker = LeafletMarker;

    fn create_map(&mut self, center: LatLng, zoom: u8) -> Result<()> {
        let map = new_map(&self.container_id);
        map.set_view(&lat_lng_array(center), zoom);
        self.map = Some(map);
        tracing::info!("Map created in #{} at {}", self.container_id, center);
        Ok(())
    }

    fn add_tile_layer(&mut self, url: &str, options: &TileLayerOptions) -> Result<()> {
        let options = serde_wasm_bindgen::to_value(options).map_err(WebError::from)?;
        tile_layer(url, &options).add_to(self.map()?);
        Ok(())
    }

    fn on_click(&mut self, sink: EventSink) -> Result<()> {
        let forward = Rc::clone(&sink);
        let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            match event_position(&event) {
                Some(position) => forward(MapEvent::Clicked(position)),
                None => tracing::warn!("Map click without coordinates"),
            }
        });
        self.map()?.on("click", &handler);
        self.click_handler = Some(handler);
        self.sink = Some(sink);
        Ok(())
    }

    fn add_point_marker(
        &mut self,
        position: LatLng,
        style: MarkerStyle,
        popup: PopupContent,
    ) -> Result<LeafletMarker> {
        let options = serde_wasm_bindgen::to_value(&CircleMarkerOptions::from(style))
            .map_err(WebError::from)?;
        let content = build_popup(&popup, self.sink.as_ref())?;
        let layer = circle_marker(&lat_lng_array(position), &options);
        layer.bind_popup(&content.element);
        layer.add_to(self.map()?);
        Ok(LeafletMarker {
            layer,
            _listeners: content.listeners,
        })
    }

    fn remove_marker(&mut self, marker: LeafletMarker) {
        marker.layer.remove();
    }

    fn show_popup(&mut self, position: LatLng, content: PopupContent) -> Result<()> {
        let content = build_popup(&content, self.sink.as_ref())?;
        new_popup()
            .set_lat_lng(&lat_lng_array(position))
            .set_content(&content.element)
            .open_on(self.map()?);
        self.popup_listeners = content.listeners;
        Ok(())
    }

    fn close_popup(&mut self) {
        if let Some(map) = &self.map {
            map.close_popup();
        }
        self.popup_listeners.clear();
    }
}
