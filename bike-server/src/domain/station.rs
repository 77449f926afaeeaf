//! Docking station types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// Stable identifier of a docking station within the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operational flag reported by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationStatus {
    /// In service (`"1"`).
    Active,
    /// Temporarily out of service (`"0"`).
    Suspended,
    /// Any other code, kept verbatim.
    Unknown(String),
}

impl StationStatus {
    /// Map a feed status code to a status.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => StationStatus::Active,
            "0" => StationStatus::Suspended,
            other => StationStatus::Unknown(other.to_string()),
        }
    }

    /// The feed code this status was read from.
    pub fn code(&self) -> &str {
        match self {
            StationStatus::Active => "1",
            StationStatus::Suspended => "0",
            StationStatus::Unknown(code) => code,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, StationStatus::Active)
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationStatus::Active => f.write_str("active"),
            StationStatus::Suspended => f.write_str("suspended"),
            StationStatus::Unknown(code) => write!(f, "unknown ({code})"),
        }
    }
}

/// One docking station as reported by a single feed snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub address: String,
    /// Administrative district.
    pub area: String,
    pub total_slots: u32,
    pub available_bikes: u32,
    pub available_slots: u32,
    pub coordinate: Coordinate,
    /// Feed-provided update timestamp, kept as text.
    pub updated_at: String,
    pub status: StationStatus,
}

impl Station {
    /// Whether the station can be placed on the map.
    pub fn is_valid(&self) -> bool {
        self.coordinate.is_valid()
    }
}

/// A station annotated with its distance from a user location.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStation {
    pub station: Station,
    pub distance_km: f64,
}
