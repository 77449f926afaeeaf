//! Boundary to whatever renders the map.

use serde::Serialize;

use crate::domain::StationId;

/// A request for the map view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewCommand {
    /// Move the camera to a station.
    CenterOnStation {
        station_id: StationId,
        latitude: f64,
        longitude: f64,
        zoom: u8,
    },
    /// Move the camera to the user.
    CenterOnUser {
        latitude: f64,
        longitude: f64,
        zoom: u8,
    },
    /// Open the detail popup of a station marker.
    OpenPopup { station_id: StationId },
    /// Hide the nearby-stations side panel.
    CollapsePanel,
}

impl ViewCommand {
    /// Short event name, used as the SSE event type.
    pub fn name(&self) -> &'static str {
        match self {
            ViewCommand::CenterOnStation { .. } => "center_on_station",
            ViewCommand::CenterOnUser { .. } => "center_on_user",
            ViewCommand::OpenPopup { .. } => "open_popup",
            ViewCommand::CollapsePanel => "collapse_panel",
        }
    }
}

/// Receives view commands. Implementations must not block.
pub trait ViewPresenter: Send + Sync + 'static {
    fn present(&self, command: ViewCommand);
}
