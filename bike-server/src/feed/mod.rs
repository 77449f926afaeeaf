//! Live station feed.
//!
//! Fetches the full station list from the public YouBike endpoint, drops
//! records that cannot be placed on a map, and publishes the rest as an
//! immutable [`Snapshot`]. A failed cycle keeps the previous snapshot.
//! Overlapping refreshes are allowed; only the most recently issued one
//! may replace the snapshot.

mod client;
mod convert;
mod error;
mod refresh;
mod snapshot;
mod source;

pub use client::{FeedClient, FeedClientConfig, StationDto};
pub use convert::validate_stations;
pub use error::FeedError;
pub use refresh::RefreshTask;
pub use snapshot::{CommitOutcome, RefreshTicket, Snapshot, SnapshotStore};
pub use source::{StationDataSource, StationSource};
