//! Marker status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a pothole is still open or has been reported fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "consertado")]
    Resolved,
}

impl Status {
    /// Stored literal for this status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ativo",
            Self::Resolved => "consertado",
        }
    }

    /// Parse a stored literal; anything else yields `None`
    #[must_use]
    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "ativo" => Some(Self::Active),
            "consertado" => Some(Self::Resolved),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
