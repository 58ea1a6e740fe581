//! Stored record layout
//!
//! The field names and status literals match what earlier versions of the
//! app wrote to `localStorage`, so existing data keeps loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{LatLng, Marker, MarkerId, SeverityValue, Status, RESOLVE_THRESHOLD};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MarkerRecord {
    lat: f64,
    lng: f64,
    gravidade: SeverityValue,
    status: String,
    upvote: u32,
    downvote: u32,
    #[serde(with = "iso8601")]
    last_interaction: DateTime<Utc>,
}

impl MarkerRecord {
    pub(super) fn into_marker(self) -> Result<Marker, String> {
        let position = LatLng::new(self.lat, self.lng);
        if !position.is_finite() {
            return Err(format!("record has non-numeric coordinates {position}"));
        }

        // Unknown literals fall back to what the vote counters imply.
        let status = Status::from_literal(&self.status).unwrap_or_else(|| {
            tracing::warn!("Unknown stored status '{}'", self.status);
            if self.downvote >= RESOLVE_THRESHOLD {
                Status::Resolved
            } else {
                Status::Active
            }
        });

        Ok(Marker {
            id: MarkerId::new(),
            lat: self.lat,
            lng: self.lng,
            severity: self.gravidade,
            status,
            upvotes: self.upvote,
            downvotes: self.downvote,
            last_interaction: self.last_interaction,
        })
    }
}

impl From<&Marker> for MarkerRecord {
    fn from(marker: &Marker) -> Self {
        Self {
            lat: marker.lat,
            lng: marker.lng,
            gravidade: marker.severity.clone(),
            status: marker.status.as_str().to_string(),
            upvote: marker.upvotes,
            downvote: marker.downvotes,
            last_interaction: marker.last_interaction,
        }
    }
}

/// ISO-8601 timestamps in the `Date.prototype.toISOString` shape
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
