//! Periodic refresh task.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::source::{StationDataSource, StationSource};

/// Background timer that refreshes the station snapshot.
///
/// The first refresh runs immediately. Each tick runs its refresh as a
/// separate task, so a slow response never delays the schedule; the
/// snapshot store decides which response wins. Dropping the task cancels
/// the timer. In-flight refreshes are left to finish and are ignored by
/// the store once the view is torn down.
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn spawn<S: StationSource>(source: Arc<StationDataSource<S>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if !source.store().is_open() {
                    debug!("view torn down, stopping station refresh");
                    break;
                }

                let source = Arc::clone(&source);
                tokio::spawn(async move { source.refresh_logged().await });
            }
        });

        Self { handle }
    }

    /// Stop scheduling refreshes.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::feed::{FeedError, SnapshotStore, StationDto};
    use crate::lifecycle::Liveness;

    #[derive(Clone, Default)]
    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl StationSource for CountingSource {
        async fn fetch_all(&self) -> Result<Vec<StationDto>, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![StationDto {
                sno: "1".into(),
                sna: "Station".into(),
                latitude: Some(25.0),
                longitude: Some(121.5),
                ..Default::default()
            }])
        }
    }

    fn spawn(liveness: &Liveness) -> (RefreshTask, Arc<AtomicUsize>, SnapshotStore) {
        let source = CountingSource::default();
        let calls = Arc::clone(&source.calls);
        let store = SnapshotStore::new(liveness.clone());
        let data_source = Arc::new(StationDataSource::new(source, store.clone()));
        let task = RefreshTask::spawn(data_source, Duration::from_secs(60));
        (task, calls, store)
    }

    #[tokio::test(start_paused = true)]
    async fn refreshes_immediately_then_periodically() {
        let liveness = Liveness::new();
        let (_task, calls, store) = spawn(&liveness);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.len().await, 1);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_the_timer() {
        let liveness = Liveness::new();
        let (task, calls, _store) = spawn(&liveness);

        tokio::time::sleep(Duration::from_secs(1)).await;
        task.cancel();

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_stops_the_timer() {
        let liveness = Liveness::new();
        let (task, calls, _store) = spawn(&liveness);

        tokio::time::sleep(Duration::from_secs(1)).await;
        liveness.tear_down();

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(task.is_finished());
    }
}
