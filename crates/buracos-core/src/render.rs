//! Rendering policy
//!
//! Maps markers to the visual style and popup content handed to the map
//! widget. Popups are plain data; each action carries the event the widget
//! must emit when the user activates it.

use crate::controller::MapEvent;
use crate::models::{LatLng, Marker, Severity, SeverityValue};

pub const COLOR_RESOLVED: &str = "green";
pub const COLOR_UNKNOWN: &str = "gray";

/// Circle style for a rendered marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: &'static str,
    /// Radius in pixels
    pub radius: u32,
}

/// A button inside a popup
#[derive(Debug, Clone, PartialEq)]
pub struct PopupAction {
    pub label: String,
    /// Fill color for swatch-style buttons
    pub swatch: Option<&'static str>,
    /// Emitted when the action is activated
    pub event: MapEvent,
}

/// Popup content: a heading, text lines, then a row of actions
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub heading: String,
    pub lines: Vec<String>,
    pub actions: Vec<PopupAction>,
}

#[must_use]
pub const fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "yellow",
        Severity::Medium => "orange",
        Severity::High => "red",
    }
}

/// Radius for a severity, smallest for unrecognized values
#[must_use]
pub fn severity_radius(severity: &SeverityValue) -> u32 {
    match severity.tier() {
        Some(Severity::Low) | None => 5,
        Some(Severity::Medium) => 7,
        Some(Severity::High) => 10,
    }
}

#[must_use]
pub fn marker_style(marker: &Marker) -> MarkerStyle {
    let color = if marker.status.is_resolved() {
        COLOR_RESOLVED
    } else {
        marker.severity.tier().map_or(COLOR_UNKNOWN, severity_color)
    };
    MarkerStyle {
        color,
        radius: severity_radius(&marker.severity),
    }
}

/// Popup bound to a rendered marker, with vote actions addressed by id
#[must_use]
pub fn marker_popup(marker: &Marker) -> Popup {
    Popup {
        heading: "Buraco".to_string(),
        lines: vec![
            format!("Gravidade: {}", marker.severity),
            format!("Status: {}", marker.status),
            format!("Upvotes: {}", marker.upvotes),
        ],
        actions: vec![
            PopupAction {
                label: "Upvote".to_string(),
                swatch: None,
                event: MapEvent::Upvote(marker.id),
            },
            PopupAction {
                label: "Downvote".to_string(),
                swatch: None,
                event: MapEvent::Downvote(marker.id),
            },
        ],
    }
}

/// Popup shown on a map click, offering one action per severity tier
#[must_use]
pub fn severity_picker(position: LatLng) -> Popup {
    Popup {
        heading: "Selecione a gravidade do buraco:".to_string(),
        lines: Vec::new(),
        actions: Severity::ALL
            .into_iter()
            .map(|severity| PopupAction {
                label: severity.as_str().to_string(),
                swatch: Some(severity_color(severity)),
                event: MapEvent::SeverityChosen { position, severity },
            })
            .collect(),
    }
}
