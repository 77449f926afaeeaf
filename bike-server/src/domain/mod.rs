//! Domain types for the bike-share dashboard.
//!
//! A [`Station`] always comes from one feed snapshot. Coordinates are plain
//! values so that a stale or corrupt record can still be represented, and
//! every consumer re-checks [`Coordinate::is_valid`] at its own boundary.

mod coordinate;
mod station;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use station::{NearbyStation, Station, StationId, StationStatus};
