//! Application state of one dashboard view.
//!
//! Owns the station snapshot, the user location and the selection. All
//! mutations go through the action methods here; nothing else writes to
//! these values.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tracing::info;

use crate::config::{DashboardConfig, MapConfig};
use crate::domain::{NearbyStation, Station, StationId};
use crate::feed::{Snapshot, SnapshotStore};
use crate::geo;
use crate::lifecycle::Liveness;
use crate::location::{GeolocationError, LocationReport, UserLocation};
use crate::search;
use crate::selection::{
    SelectOutcome, SelectStation, Selection, SelectionController, ViewCommand, ViewPresenter,
};

/// Errors dispatching a selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectError {
    #[error("station {0} is not in the current snapshot")]
    UnknownStation(StationId),
}

pub struct Dashboard {
    store: SnapshotStore,
    location: RwLock<Option<UserLocation>>,
    selection: SelectionController,
    presenter: Arc<dyn ViewPresenter>,
    liveness: Liveness,
    config: DashboardConfig,
    map: MapConfig,
}

impl Dashboard {
    /// Create an empty dashboard. The snapshot store is created here and
    /// shared with the feed through [`Dashboard::store`].
    pub fn new(
        presenter: Arc<dyn ViewPresenter>,
        config: DashboardConfig,
        map: MapConfig,
    ) -> Self {
        let liveness = Liveness::new();
        let selection =
            SelectionController::new(Arc::clone(&presenter), liveness.clone(), &config, &map);

        Self {
            store: SnapshotStore::new(liveness.clone()),
            location: RwLock::new(None),
            selection,
            presenter,
            liveness,
            config,
            map,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn map(&self) -> &MapConfig {
        &self.map
    }

    pub async fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.store.current().await
    }

    /// Dispatch a selection coming from search, the nearby list or a marker.
    pub async fn select(&self, command: SelectStation) -> Result<SelectOutcome, SelectError> {
        let station = self
            .find_station(&command.station_id)
            .await
            .ok_or_else(|| SelectError::UnknownStation(command.station_id.clone()))?;

        Ok(self
            .selection
            .select(station, command.origin, command.viewport_width))
    }

    async fn find_station(&self, id: &StationId) -> Option<Station> {
        let snapshot = self.store.current().await?;
        snapshot.station(id).cloned()
    }

    pub fn selection(&self) -> Selection {
        self.selection.current()
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<Selection> {
        self.selection.subscribe()
    }

    /// Handle the result of a "locate me" request.
    ///
    /// On success the location replaces any previous one, the map is
    /// centered on the user and the nearby list is returned. On failure
    /// the previous location is kept.
    pub async fn locate(
        &self,
        report: LocationReport,
    ) -> Result<Vec<NearbyStation>, GeolocationError> {
        let location = report.into_location()?;
        *self.location.write().await = Some(location);

        info!(
            latitude = location.coordinate.latitude,
            longitude = location.coordinate.longitude,
            "user located"
        );
        self.presenter.present(ViewCommand::CenterOnUser {
            latitude: location.coordinate.latitude,
            longitude: location.coordinate.longitude,
            zoom: self.map.user_zoom,
        });

        Ok(self.nearby_from(location).await)
    }

    pub async fn user_location(&self) -> Option<UserLocation> {
        *self.location.read().await
    }

    /// Nearby stations for the stored user location, or `None` if the
    /// user has not been located yet.
    pub async fn nearby(&self) -> Option<Vec<NearbyStation>> {
        let location = self.user_location().await?;
        Some(self.nearby_from(location).await)
    }

    async fn nearby_from(&self, location: UserLocation) -> Vec<NearbyStation> {
        match self.store.current().await {
            Some(snapshot) => geo::nearby(
                &snapshot.stations,
                location.coordinate,
                self.config.nearby_radius_km,
            ),
            None => Vec::new(),
        }
    }

    /// Search the current snapshot by name or address.
    pub async fn search(&self, query: &str) -> Vec<Station> {
        match self.store.current().await {
            Some(snapshot) => {
                search::search_limited(&snapshot.stations, query, self.config.max_search_results)
                    .into_iter()
                    .cloned()
                    .collect()
            }
            None => Vec::new(),
        }
    }

    /// Tear the view down. Late feed responses and pending popups become
    /// no-ops.
    pub fn tear_down(&self) {
        info!("tearing down dashboard");
        self.liveness.tear_down();
    }
}
