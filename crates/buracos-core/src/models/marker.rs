//! Marker model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Severity, SeverityValue, Status};
use crate::util;

/// Downvotes needed before a marker is considered fixed
pub const RESOLVE_THRESHOLD: u32 = 2;

/// A unique identifier for a marker, using UUID v7 (time-sortable)
///
/// Ids live for the browser session only; stored records carry no id and get a
/// fresh one when loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(Uuid);

impl MarkerId {
    /// Create a new unique marker ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MarkerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components fall inside the valid degree ranges
    #[must_use]
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Whether both components are real numbers
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Bring the longitude back into `[-180, 180]`.
    ///
    /// Map clicks past the antimeridian report longitudes such as `313.37`.
    #[must_use]
    pub fn wrapped(self) -> Self {
        if (-180.0..=180.0).contains(&self.lng) || !self.lng.is_finite() {
            return self;
        }
        Self::new(self.lat, (self.lng + 180.0).rem_euclid(360.0) - 180.0)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

/// A reported pothole
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Session-scoped identifier
    pub id: MarkerId,
    pub lat: f64,
    pub lng: f64,
    pub severity: SeverityValue,
    pub status: Status,
    pub upvotes: u32,
    pub downvotes: u32,
    /// Creation time, then the time of the latest vote
    pub last_interaction: DateTime<Utc>,
}

impl Marker {
    /// Create a new active marker with no votes
    #[must_use]
    pub fn new(lat: f64, lng: f64, severity: Severity) -> Self {
        Self {
            id: MarkerId::new(),
            lat,
            lng,
            severity: severity.into(),
            status: Status::Active,
            upvotes: 0,
            downvotes: 0,
            last_interaction: util::now(),
        }
    }

    #[must_use]
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn upvote(&mut self) {
        self.upvotes = self.upvotes.saturating_add(1);
        self.last_interaction = util::now();
    }

    /// Record a downvote, resolving the marker once the threshold is reached.
    ///
    /// Resolution is one-way; further downvotes only grow the counter.
    pub fn downvote(&mut self) {
        self.downvotes = self.downvotes.saturating_add(1);
        self.last_interaction = util::now();
        if self.downvotes >= RESOLVE_THRESHOLD {
            self.status = Status::Resolved;
        }
    }

    /// Check whether the marker is still an open report
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.status.is_resolved()
    }

    /// Compare everything except the session id
    #[must_use]
    #[allow(clippy::float_cmp)] // Coordinates are copied, never computed
    pub fn same_attributes(&self, other: &Self) -> bool {
        self.lat == other.lat
            && self.lng == other.lng
            && self.severity == other.severity
            && self.status == other.status
            && self.upvotes == other.upvotes
            && self.downvotes == other.downvotes
            && self.last_interaction == other.last_interaction
    }
}
