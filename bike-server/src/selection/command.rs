//! The select-station action.

use serde::Deserialize;

use crate::domain::StationId;

/// Where a selection was triggered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrigin {
    /// A search dropdown entry.
    Search,
    /// An entry of the nearby-stations panel.
    NearbyList,
    /// A map marker.
    Marker,
}

/// Request to make a station the current selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectStation {
    pub station_id: StationId,
    pub origin: SelectionOrigin,
    /// Width of the requesting viewport in logical pixels, if known.
    #[serde(default)]
    pub viewport_width: Option<u32>,
}

impl SelectStation {
    pub fn new(station_id: StationId, origin: SelectionOrigin) -> Self {
        Self {
            station_id,
            origin,
            viewport_width: None,
        }
    }
}
