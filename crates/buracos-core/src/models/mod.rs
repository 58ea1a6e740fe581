//! Data models for Buracos

mod marker;
mod severity;
mod status;

pub use marker::{LatLng, Marker, MarkerId, RESOLVE_THRESHOLD};
pub use severity::{Severity, SeverityValue};
pub use status::Status;
