//! Severity tiers for a reported pothole

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Severity picked by the reporter when placing a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// All tiers, in the order they are offered to the user
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Stored literal for this tier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(Error::InvalidInput(format!("unknown severity '{other}'"))),
        }
    }
}

/// Severity as carried by a marker.
///
/// New markers always hold a known tier. Markers loaded from storage may hold
/// any string; those are kept verbatim and rendered with the neutral fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeverityValue {
    Known(Severity),
    Unrecognized(String),
}

impl SeverityValue {
    /// The known tier, if any
    #[must_use]
    pub const fn tier(&self) -> Option<Severity> {
        match self {
            Self::Known(severity) => Some(*severity),
            Self::Unrecognized(_) => None,
        }
    }

    /// Literal as shown to the user and written to storage
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(severity) => severity.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<Severity> for SeverityValue {
    fn from(severity: Severity) -> Self {
        Self::Known(severity)
    }
}

impl From<String> for SeverityValue {
    fn from(raw: String) -> Self {
        raw.parse::<Severity>()
            .map_or(Self::Unrecognized(raw), Self::Known)
    }
}

impl From<SeverityValue> for String {
    fn from(value: SeverityValue) -> Self {
        match value {
            SeverityValue::Known(severity) => severity.as_str().to_string(),
            SeverityValue::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for SeverityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
