//! Browser Geolocation API

use std::rc::Rc;

use buracos_core::controller::{EventSink, Geolocator, MapEvent};
use buracos_core::LatLng;
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::PositionOptions;

use crate::error::WebError;
use crate::options::GeolocationOptions;

/// `navigator.geolocation.getCurrentPosition` with a timeout
pub struct BrowserGeolocator {
    timeout_ms: u32,
}

impl BrowserGeolocator {
    pub const fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    fn request(&self, sink: &EventSink) -> Result<(), WebError> {
        let window = web_sys::window().ok_or(WebError::Unavailable("window"))?;
        let geolocation = window.navigator().geolocation()?;
        let options: PositionOptions =
            serde_wasm_bindgen::to_value(&GeolocationOptions::with_timeout(self.timeout_ms))?
                .unchecked_into();

        // The browser calls exactly one of these, once.
        let on_success = {
            let sink = Rc::clone(sink);
            Closure::once_into_js(move |position: JsValue| match read_position(&position) {
                Some(position) => sink(MapEvent::Located(position)),
                None => {
                    tracing::warn!("Geolocation answered without usable coordinates");
                    sink(MapEvent::LocationUnavailable);
                }
            })
        };
        let on_error = {
            let sink = Rc::clone(sink);
            Closure::once_into_js(move |error: JsValue| {
                tracing::info!("Geolocation failed: {:?}", error);
                sink(MapEvent::LocationUnavailable);
            })
        };

        geolocation.get_current_position_with_error_callback_and_options(
            on_success.unchecked_ref::<Function>(),
            Some(on_error.unchecked_ref::<Function>()),
            &options,
        )?;
        Ok(())
    }
}

impl Geolocator for BrowserGeolocator {
    fn locate(&self, sink: EventSink) {
        if let Err(e) = self.request(&sink) {
            tracing::info!("Geolocation unavailable: {}", e);
            sink(MapEvent::LocationUnavailable);
        }
    }
}

/// Read `position.coords.{latitude,longitude}`
fn read_position(position: &JsValue) -> Option<LatLng> {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = Reflect::get(&coords, &JsValue::from_str("latitude"))
        .ok()?
        .as_f64()?;
    let lng = Reflect::get(&coords, &JsValue::from_str("longitude"))
        .ok()?
        .as_f64()?;
    Some(LatLng::new(lat, lng)).filter(|position| position.is_valid())
}
