//! Selection state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::warn;

use super::command::SelectionOrigin;
use super::presenter::{ViewCommand, ViewPresenter};
use crate::config::{DashboardConfig, MapConfig};
use crate::domain::{Station, StationId};
use crate::lifecycle::Liveness;

/// The currently highlighted station, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    Selected(Station),
}

impl Selection {
    pub fn station(&self) -> Option<&Station> {
        match self {
            Selection::None => None,
            Selection::Selected(station) => Some(station),
        }
    }
}

/// What `select` could do with the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The map was asked to center on the station and open its popup.
    Focused,
    /// The station has invalid coordinates; only the selection changed.
    Unfocusable,
}

/// Owns the current selection and drives the map view.
///
/// There is no deselect: once a station is selected, some station stays
/// selected for the life of the view.
pub struct SelectionController {
    state: watch::Sender<Selection>,
    presenter: Arc<dyn ViewPresenter>,
    liveness: Liveness,
    settle_delay: Duration,
    narrow_viewport_px: u32,
    station_zoom: u8,
}

impl SelectionController {
    pub fn new(
        presenter: Arc<dyn ViewPresenter>,
        liveness: Liveness,
        config: &DashboardConfig,
        map: &MapConfig,
    ) -> Self {
        let (state, _) = watch::channel(Selection::None);

        Self {
            state,
            presenter,
            liveness,
            settle_delay: config.settle_delay,
            narrow_viewport_px: config.narrow_viewport_px,
            station_zoom: map.station_zoom,
        }
    }

    /// Select `station`.
    ///
    /// Re-selecting the current station is allowed and opens its popup
    /// again. The popup is requested after the settle delay on a spawned
    /// task, so this must be called from within a tokio runtime.
    pub fn select(
        &self,
        station: Station,
        origin: SelectionOrigin,
        viewport_width: Option<u32>,
    ) -> SelectOutcome {
        let station_id = station.id.clone();
        let coordinate = station.coordinate;
        let focusable = station.is_valid();

        self.state.send_replace(Selection::Selected(station));

        let outcome = if focusable {
            self.presenter.present(ViewCommand::CenterOnStation {
                station_id: station_id.clone(),
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
                zoom: self.station_zoom,
            });
            self.schedule_popup(station_id);
            SelectOutcome::Focused
        } else {
            warn!(
                station = %station_id,
                latitude = coordinate.latitude,
                longitude = coordinate.longitude,
                "not focusing station with invalid coordinates"
            );
            SelectOutcome::Unfocusable
        };

        if origin == SelectionOrigin::NearbyList
            && viewport_width.is_some_and(|w| w <= self.narrow_viewport_px)
        {
            self.presenter.present(ViewCommand::CollapsePanel);
        }

        outcome
    }

    fn schedule_popup(&self, station_id: StationId) {
        let presenter = Arc::clone(&self.presenter);
        let liveness = self.liveness.clone();
        let delay = self.settle_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if liveness.is_alive() {
                presenter.present(ViewCommand::OpenPopup { station_id });
            }
        });
    }

    /// A copy of the current selection.
    pub fn current(&self) -> Selection {
        self.state.borrow().clone()
    }

    /// Observe selection changes.
    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::{Coordinate, StationStatus};

    #[derive(Default)]
    struct RecordingPresenter {
        commands: Mutex<Vec<ViewCommand>>,
    }

    impl RecordingPresenter {
        fn names(&self) -> Vec<&'static str> {
            self.commands.lock().unwrap().iter().map(|c| c.name()).collect()
        }
    }

    impl ViewPresenter for RecordingPresenter {
        fn present(&self, command: ViewCommand) {
            self.commands.lock().unwrap().push(command);
        }
    }

    fn station(id: &str, latitude: f64) -> Station {
        Station {
            id: StationId::new(id),
            name: format!("Station {id}"),
            address: String::new(),
            area: String::new(),
            total_slots: 10,
            available_bikes: 5,
            available_slots: 5,
            coordinate: Coordinate::new(latitude, 121.5),
            updated_at: String::new(),
            status: StationStatus::Active,
        }
    }

    fn controller(liveness: Liveness) -> (SelectionController, Arc<RecordingPresenter>) {
        let presenter = Arc::new(RecordingPresenter::default());
        let controller = SelectionController::new(
            presenter.clone(),
            liveness,
            &DashboardConfig::default(),
            &MapConfig::default(),
        );
        (controller, presenter)
    }

    #[tokio::test(start_paused = true)]
    async fn select_centers_then_opens_popup_after_settle_delay() {
        let (controller, presenter) = controller(Liveness::new());

        let outcome = controller.select(station("a", 25.0), SelectionOrigin::Search, None);
        assert_eq!(outcome, SelectOutcome::Focused);
        assert_eq!(presenter.names(), vec!["center_on_station"]);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(presenter.names(), vec!["center_on_station"]);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(presenter.names(), vec!["center_on_station", "open_popup"]);

        let commands = presenter.commands.lock().unwrap();
        assert_eq!(
            commands[0],
            ViewCommand::CenterOnStation {
                station_id: StationId::new("a"),
                latitude: 25.0,
                longitude: 121.5,
                zoom: 18,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn reselect_is_idempotent_and_reopens_popup() {
        let (controller, presenter) = controller(Liveness::new());
        let a = station("a", 25.0);

        controller.select(a.clone(), SelectionOrigin::Marker, None);
        controller.select(a.clone(), SelectionOrigin::Marker, None);
        assert_eq!(controller.current(), Selection::Selected(a));

        tokio::time::sleep(Duration::from_secs(1)).await;
        let popups = presenter
            .names()
            .into_iter()
            .filter(|n| *n == "open_popup")
            .count();
        assert_eq!(popups, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_coordinates_only_update_selection() {
        let (controller, presenter) = controller(Liveness::new());
        let bad = station("bad", 999.0);

        let outcome = controller.select(bad.clone(), SelectionOrigin::Search, None);
        assert_eq!(outcome, SelectOutcome::Unfocusable);
        assert_eq!(controller.current(), Selection::Selected(bad));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(presenter.names().is_empty());
    }

    #[tokio::test]
    async fn narrow_list_selection_collapses_panel() {
        let (controller, presenter) = controller(Liveness::new());

        controller.select(station("a", 25.0), SelectionOrigin::NearbyList, Some(768));
        assert_eq!(presenter.names(), vec!["center_on_station", "collapse_panel"]);
    }

    #[tokio::test]
    async fn wide_or_non_list_selection_keeps_panel() {
        let (controller, presenter) = controller(Liveness::new());

        controller.select(station("a", 25.0), SelectionOrigin::NearbyList, Some(769));
        controller.select(station("b", 25.0), SelectionOrigin::NearbyList, None);
        controller.select(station("c", 25.0), SelectionOrigin::Search, Some(320));
        controller.select(station("d", 25.0), SelectionOrigin::Marker, Some(320));

        assert!(!presenter.names().contains(&"collapse_panel"));
    }

    #[tokio::test(start_paused = true)]
    async fn popup_skipped_after_teardown() {
        let liveness = Liveness::new();
        let (controller, presenter) = controller(liveness.clone());

        controller.select(station("a", 25.0), SelectionOrigin::Search, None);
        liveness.tear_down();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(presenter.names(), vec!["center_on_station"]);
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let (controller, _presenter) = controller(Liveness::new());
        let mut rx = controller.subscribe();
        assert_eq!(*rx.borrow(), Selection::None);

        controller.select(station("a", 25.0), SelectionOrigin::Marker, None);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().station().map(|s| s.id.as_str()), Some("a"));
    }
}
