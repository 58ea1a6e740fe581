//! buracos-core - Core library for Buracos
//!
//! This crate contains the marker model, the voting state machine, the
//! local-storage persistence contract, and the map controller that the web
//! front end drives.

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod registry;
pub mod render;
pub mod store;
mod util;

pub use config::MapConfig;
pub use error::{Error, Result};
pub use models::{LatLng, Marker, MarkerId, Severity, SeverityValue, Status};
pub use registry::{MarkerRegistry, MarkerSummary};
