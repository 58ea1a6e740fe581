//! Main application component

use std::rc::Rc;

use buracos_core::controller::{EventSink, MapController, MapEvent, Phase};
use buracos_core::{MapConfig, MarkerSummary};
use dioxus::prelude::*;
use futures_channel::mpsc;
use futures_util::StreamExt;

use crate::components::Header;
use crate::services::{BrowserGeolocator, BrowserStore, LeafletMap};
use crate::state::AppState;
use crate::theme::PALETTE;

/// Root application component
#[component]
pub fn App() -> Element {
    let mut summary = use_signal(MarkerSummary::default);
    let mut phase = use_signal(|| Phase::AwaitingLocation);
    let mut started = use_signal(|| false);
    let config = use_hook(MapConfig::default);
    let container_id = config.container_id.clone();

    // Bring the map up once the container div is mounted (only once)
    use_effect(move || {
        if started() {
            return;
        }
        started.set(true); // Mark immediately to prevent double init

        let (tx, mut rx) = mpsc::unbounded::<MapEvent>();
        let sink: EventSink = Rc::new(move |event| {
            if let Err(e) = tx.unbounded_send(event) {
                tracing::warn!("Dropping map event, event loop is gone: {}", e);
            }
        });

        let widget = LeafletMap::new(config.container_id.clone());
        let mut controller =
            match MapController::new(config.clone(), BrowserStore::open(), widget, sink) {
                Ok(controller) => controller,
                Err(e) => {
                    tracing::error!("Failed to initialize map controller: {}", e);
                    return;
                }
            };
        summary.set(controller.registry().summary());
        controller.start(&BrowserGeolocator::new(config.geolocation_timeout_ms));

        // Single consumer: events are handled one at a time, in order
        spawn(async move {
            while let Some(event) = rx.next().await {
                if let Err(e) = controller.handle(event) {
                    tracing::error!("Failed to handle map event: {}", e);
                }
                summary.set(controller.registry().summary());
                phase.set(controller.phase());
            }
        });
    });

    use_context_provider(|| AppState { summary, phase });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        div {
            class: "app-container",
            style: "
                font-family: system-ui, -apple-system, sans-serif;
                background: {PALETTE.bg_primary};
                color: {PALETTE.text_primary};
            ",
            Header {}

            if phase() == Phase::AwaitingLocation {
                div { class: "locating", "Obtendo sua localização..." }
            }

            div { id: "{container_id}" }
        }
    }
}
