// ── Central reactive data store ──
//
// Local mirror of the remote producer registry. Mutations are broadcast
// to subscribers via `watch` channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::collection::{EntityCollection, Snapshot};
use crate::model::{DashboardSummary, Producer, ProducerId};
use crate::stream::EntityStream;

/// Central reactive store for producer data.
///
/// Reads never perform I/O. The only writers are the reconciliation
/// methods in `reconcile.rs`, called by the `Controller` after the remote
/// service has confirmed an operation.
pub struct DataStore {
    pub(crate) producers: EntityCollection<Producer>,
    pub(crate) dashboard: watch::Sender<Option<Arc<DashboardSummary>>>,
    pub(crate) last_load: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (dashboard, _) = watch::channel(None);
        let (last_load, _) = watch::channel(None);

        Self {
            producers: EntityCollection::new(),
            dashboard,
            last_load,
        }
    }

    // ── Producers ────────────────────────────────────────────────────

    /// Local lookup by identifier.
    pub fn producer(&self, id: ProducerId) -> Option<Arc<Producer>> {
        self.producers.get(id)
    }

    pub fn producers_snapshot(&self) -> Snapshot<Producer> {
        self.producers.snapshot()
    }

    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    pub fn subscribe_producers(&self) -> EntityStream<Producer> {
        EntityStream::new(self.producers.subscribe())
    }

    /// Bumped on every change to the producer collection.
    pub fn producers_version(&self) -> u64 {
        self.producers.version()
    }

    // ── Dashboard ────────────────────────────────────────────────────

    pub fn dashboard(&self) -> Option<Arc<DashboardSummary>> {
        self.dashboard.borrow().clone()
    }

    pub fn subscribe_dashboard(&self) -> watch::Receiver<Option<Arc<DashboardSummary>>> {
        self.dashboard.subscribe()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    /// When the collection was last replaced by a successful load.
    pub fn last_load(&self) -> Option<DateTime<Utc>> {
        *self.last_load.borrow()
    }

    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_load().map(|t| Utc::now() - t)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
