//! Application state management
//!
//! State shared with components via Dioxus context providers.

use buracos_core::controller::Phase;
use buracos_core::MarkerSummary;
use dioxus::prelude::*;

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Marker counts, refreshed after every handled event
    pub summary: Signal<MarkerSummary>,
    /// Whether the map has been created yet
    pub phase: Signal<Phase>,
}
