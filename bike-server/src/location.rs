//! User geolocation as reported by the browser.

use serde::Deserialize;

use crate::domain::Coordinate;

/// Where the user is, as of the last "locate me" action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserLocation {
    pub coordinate: Coordinate,
}

/// Failure codes the browser geolocation API can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationFailure {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
}

/// Outcome of one browser geolocation request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocationReport {
    Position { latitude: f64, longitude: f64 },
    Failure { error: GeolocationFailure },
}

/// Why the user's location could not be used.
///
/// The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Unable to get your location. Please make sure location permission is enabled.")]
    PermissionDenied,

    #[error("Your location is currently unavailable. Please try again later.")]
    PositionUnavailable,

    #[error("Locating you took too long. Please try again.")]
    Timeout,

    #[error("Your browser does not support geolocation.")]
    Unsupported,

    #[error("Your device reported an invalid position.")]
    InvalidPosition,
}

impl From<GeolocationFailure> for GeolocationError {
    fn from(failure: GeolocationFailure) -> Self {
        match failure {
            GeolocationFailure::PermissionDenied => GeolocationError::PermissionDenied,
            GeolocationFailure::PositionUnavailable => GeolocationError::PositionUnavailable,
            GeolocationFailure::Timeout => GeolocationError::Timeout,
            GeolocationFailure::Unsupported => GeolocationError::Unsupported,
        }
    }
}

impl LocationReport {
    /// Resolve the report into a usable location.
    pub fn into_location(self) -> Result<UserLocation, GeolocationError> {
        match self {
            LocationReport::Position {
                latitude,
                longitude,
            } => Coordinate::parse(latitude, longitude)
                .map(|coordinate| UserLocation { coordinate })
                .map_err(|_| GeolocationError::InvalidPosition),
            LocationReport::Failure { error } => Err(error.into()),
        }
    }
}
