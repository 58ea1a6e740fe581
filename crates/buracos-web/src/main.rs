//! Buracos Web Application
//!
//! Browser entrypoint: a Leaflet map where potholes are reported and voted on.

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(any(target_arch = "wasm32", test))]
mod error;
#[cfg(any(target_arch = "wasm32", test))]
mod options;
#[cfg(target_arch = "wasm32")]
mod services;
#[cfg(target_arch = "wasm32")]
mod state;
#[cfg(any(target_arch = "wasm32", test))]
mod theme;

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    dioxus::logger::init(tracing::Level::INFO).expect("logger should only be initialized once");

    tracing::info!("Starting Buracos...");
    dioxus::launch(app::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    println!(
        "buracos-web runs in the browser. Try: dx serve -p buracos-web --platform web"
    );
}
