//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// Error returned when a latitude/longitude pair is not usable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    reason: &'static str,
}

/// A WGS84 point in degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Examples
    ///
    /// ```
    /// use bike_server::domain::Coordinate;
    ///
    /// assert!(Coordinate::parse(25.0330, 121.5654).is_ok());
    /// assert!(Coordinate::parse(999.0, 121.5654).is_err());
    /// assert!(Coordinate::parse(f64::NAN, 0.0).is_err());
    /// ```
    pub fn parse(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let reject = |reason| InvalidCoordinate {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(reject("must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(reject("latitude must be within -90..90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(reject("longitude must be within -180..180"));
        }

        Ok(Self::new(latitude, longitude))
    }

    /// Whether both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        Self::parse(self.latitude, self.longitude).is_ok()
    }
}
