//! Sequence-guarded station snapshot.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use tokio::sync::RwLock;

use crate::domain::{Station, StationId};
use crate::lifecycle::Liveness;

/// The full station list produced by one successful refresh.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Sequence number of the refresh that produced this snapshot.
    pub sequence: u64,
    pub fetched_at: DateTime<Local>,
    pub stations: Vec<Station>,
}

impl Snapshot {
    /// Look up a station by id.
    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.iter().find(|s| &s.id == id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Proof that a refresh was started; carries its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Result of trying to publish a refresh result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The snapshot was replaced.
    Applied { count: usize },
    /// A newer refresh was issued meanwhile; the result was discarded.
    Superseded,
    /// The view was torn down; the result was discarded.
    Closed,
}

struct Inner {
    current: RwLock<Option<Arc<Snapshot>>>,
    issued: AtomicU64,
}

/// Thread-safe holder of the live snapshot.
///
/// Readers always see a complete snapshot. A result is only published when
/// its ticket is the most recently issued one, so a slow response can never
/// overwrite a fresher one.
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<Inner>,
    liveness: Liveness,
}

impl SnapshotStore {
    pub fn new(liveness: Liveness) -> Self {
        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(None),
                issued: AtomicU64::new(0),
            }),
            liveness,
        }
    }

    /// Issue a ticket for a refresh that is about to start.
    pub fn begin(&self) -> RefreshTicket {
        RefreshTicket(self.inner.issued.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Publish the stations fetched under `ticket`.
    pub async fn commit(&self, ticket: RefreshTicket, stations: Vec<Station>) -> CommitOutcome {
        if !self.liveness.is_alive() {
            return CommitOutcome::Closed;
        }

        let mut guard = self.inner.current.write().await;
        // Teardown may have happened while waiting for the lock.
        if !self.liveness.is_alive() {
            return CommitOutcome::Closed;
        }
        if ticket.0 != self.inner.issued.load(Ordering::Acquire) {
            return CommitOutcome::Superseded;
        }

        let count = stations.len();
        *guard = Some(Arc::new(Snapshot {
            sequence: ticket.0,
            fetched_at: Local::now(),
            stations,
        }));

        CommitOutcome::Applied { count }
    }

    /// Whether results are still accepted (the view is mounted).
    pub fn is_open(&self) -> bool {
        self.liveness.is_alive()
    }

    /// The current snapshot, if any refresh has succeeded yet.
    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.inner.current.read().await.clone()
    }

    /// Number of stations in the current snapshot.
    pub async fn len(&self) -> usize {
        self.current().await.map_or(0, |s| s.len())
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, StationStatus};

    fn station(id: &str) -> Station {
        Station {
            id: StationId::new(id),
            name: format!("Station {id}"),
            address: String::new(),
            area: String::new(),
            total_slots: 10,
            available_bikes: 5,
            available_slots: 5,
            coordinate: Coordinate::new(25.0, 121.5),
            updated_at: String::new(),
            status: StationStatus::Active,
        }
    }

    #[tokio::test]
    async fn starts_empty() {
        let store = SnapshotStore::new(Liveness::new());
        assert!(store.current().await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn commit_replaces_snapshot() {
        let store = SnapshotStore::new(Liveness::new());

        let ticket = store.begin();
        let outcome = store.commit(ticket, vec![station("a"), station("b")]).await;
        assert_eq!(outcome, CommitOutcome::Applied { count: 2 });

        let ticket = store.begin();
        store.commit(ticket, vec![station("c")]).await;

        let snapshot = store.current().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.sequence, 2);
        assert!(snapshot.station(&StationId::new("c")).is_some());
        assert!(snapshot.station(&StationId::new("a")).is_none());
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let store = SnapshotStore::new(Liveness::new());

        let older = store.begin();
        let newer = store.begin();
        assert!(older < newer);

        let outcome = store.commit(newer, vec![station("new")]).await;
        assert_eq!(outcome, CommitOutcome::Applied { count: 1 });

        // The older request resolves last but must not win.
        let outcome = store.commit(older, vec![station("old")]).await;
        assert_eq!(outcome, CommitOutcome::Superseded);

        let snapshot = store.current().await.unwrap();
        assert_eq!(snapshot.stations[0].id.as_str(), "new");
    }

    #[tokio::test]
    async fn commit_after_teardown_is_noop() {
        let liveness = Liveness::new();
        let store = SnapshotStore::new(liveness.clone());

        let ticket = store.begin();
        liveness.tear_down();

        let outcome = store.commit(ticket, vec![station("a")]).await;
        assert_eq!(outcome, CommitOutcome::Closed);
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn teardown_while_waiting_for_lock_is_noop() {
        let liveness = Liveness::new();
        let store = SnapshotStore::new(liveness.clone());
        let ticket = store.begin();

        let held = store.inner.current.write().await;
        let pending = tokio::spawn({
            let store = store.clone();
            async move { store.commit(ticket, vec![station("a")]).await }
        });

        // Let the commit get past its first check and block on the lock.
        tokio::task::yield_now().await;
        liveness.tear_down();
        drop(held);

        assert_eq!(pending.await.unwrap(), CommitOutcome::Closed);
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn readers_keep_their_snapshot() {
        let store = SnapshotStore::new(Liveness::new());
        let ticket = store.begin();
        store.commit(ticket, vec![station("a")]).await;

        let held = store.current().await.unwrap();
        let ticket = store.begin();
        store.commit(ticket, vec![station("b"), station("c")]).await;

        assert_eq!(held.len(), 1);
        assert_eq!(store.len().await, 2);
    }
}
