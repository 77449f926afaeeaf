//! Feed-backed station data source.

use std::future::Future;

use tracing::{info, warn};

use super::client::StationDto;
use super::convert::validate_stations;
use super::error::FeedError;
use super::snapshot::{CommitOutcome, SnapshotStore};
use crate::domain::Station;

/// Something that can produce the raw station list.
///
/// Implemented by [`FeedClient`](super::FeedClient); tests provide
/// in-memory sources.
pub trait StationSource: Send + Sync + 'static {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<StationDto>, FeedError>> + Send;
}

/// Couples a [`StationSource`] with the snapshot it feeds.
pub struct StationDataSource<S> {
    source: S,
    store: SnapshotStore,
}

impl<S: StationSource> StationDataSource<S> {
    pub fn new(source: S, store: SnapshotStore) -> Self {
        Self { source, store }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Fetch and validate without touching the snapshot.
    ///
    /// Fails with [`FeedError::Empty`] when no record has usable coordinates.
    pub async fn fetch_valid(&self) -> Result<Vec<Station>, FeedError> {
        let records = self.source.fetch_all().await?;
        let stations = validate_stations(records);

        if stations.is_empty() {
            return Err(FeedError::Empty);
        }

        Ok(stations)
    }

    /// Run one refresh cycle.
    ///
    /// On failure the current snapshot is left untouched.
    pub async fn refresh(&self) -> Result<CommitOutcome, FeedError> {
        let ticket = self.store.begin();
        let stations = self.fetch_valid().await?;
        Ok(self.store.commit(ticket, stations).await)
    }

    /// Run one refresh cycle, logging and swallowing any error.
    pub async fn refresh_logged(&self) {
        match self.refresh().await {
            Ok(CommitOutcome::Applied { count }) => info!(count, "station snapshot refreshed"),
            Ok(CommitOutcome::Superseded) => info!("discarded superseded station response"),
            Ok(CommitOutcome::Closed) => {}
            Err(e) => warn!(error = %e, "station refresh failed, keeping previous snapshot"),
        }
    }
}
