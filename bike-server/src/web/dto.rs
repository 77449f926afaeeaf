//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{NearbyStation, Station};
use crate::feed::Snapshot;
use crate::selection::Selection;
use crate::usage::ChartKind;

/// A station as sent to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationResult {
    /// Station number
    pub id: String,

    pub name: String,

    pub address: String,

    /// Administrative district
    pub area: String,

    pub total_slots: u32,

    /// Bikes available to rent
    pub available_bikes: u32,

    /// Free docks to return a bike
    pub available_slots: u32,

    pub latitude: f64,

    pub longitude: f64,

    /// Feed update time
    pub updated_at: String,

    /// Raw feed status code
    pub status: String,

    pub is_active: bool,

    /// Distance from the user, only for nearby results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.as_str().to_string(),
            name: station.name.clone(),
            address: station.address.clone(),
            area: station.area.clone(),
            total_slots: station.total_slots,
            available_bikes: station.available_bikes,
            available_slots: station.available_slots,
            latitude: station.coordinate.latitude,
            longitude: station.coordinate.longitude,
            updated_at: station.updated_at.clone(),
            status: station.status.code().to_string(),
            is_active: station.status.is_active(),
            distance_km: None,
        }
    }

    pub fn from_nearby(nearby: &NearbyStation) -> Self {
        Self {
            distance_km: Some(nearby.distance_km),
            ..Self::from_station(&nearby.station)
        }
    }
}

/// Response for the full station list.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Snapshot sequence number, 0 before the first successful refresh
    pub sequence: u64,

    /// RFC 3339 time of the refresh, if any
    pub fetched_at: Option<String>,

    pub stations: Vec<StationResult>,
}

impl StationsResponse {
    pub fn from_snapshot(snapshot: Option<&Snapshot>) -> Self {
        match snapshot {
            Some(s) => Self {
                sequence: s.sequence,
                fetched_at: Some(s.fetched_at.to_rfc3339()),
                stations: s.stations.iter().map(StationResult::from_station).collect(),
            },
            None => Self {
                sequence: 0,
                fetched_at: None,
                stations: Vec::new(),
            },
        }
    }
}

/// Query for station search.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Free-text query
    #[serde(default)]
    pub q: String,
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationResult>,
}

/// Response for the nearby-stations panel.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    /// Whether the user has been located
    pub located: bool,

    /// Radius used for the list, in kilometres
    pub radius_km: f64,

    /// Stations closest first
    pub stations: Vec<StationResult>,
}

/// Current selection.
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub selected: Option<StationResult>,
}

impl SelectionResponse {
    pub fn from_selection(selection: &Selection) -> Self {
        Self {
            selected: selection.station().map(StationResult::from_station),
        }
    }
}

/// Query for the usage chart.
#[derive(Debug, Deserialize)]
pub struct UsageRequest {
    #[serde(default)]
    pub kind: ChartKind,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
