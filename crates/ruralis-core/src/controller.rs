// ── Controller ──
//
// The resource store's public face: every operation against the remote
// producer registry goes through here. Writes are validated locally,
// sent to the backend, and only on success reconciled into the
// DataStore. Each call returns its own `Result`; the shared in-flight
// count and last-error slot are kept for display.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use ruralis_api::ApiClient;

use crate::activity::Activity;
use crate::backend::Backend;
use crate::command::requests::{CultureDraft, ProducerDraft, ProducerPatch};
use crate::command::{Command, CommandResult, Operation};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{Culture, CultureId, DashboardSummary, Producer, ProducerId};
use crate::store::{DataStore, Snapshot};
use crate::stream::EntityStream;
use crate::validate::{validate_culture, validate_draft, validate_patch};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. Operations may be issued concurrently
/// from clones; they complete in network-completion order.
pub struct Controller<B: Backend = ApiClient> {
    inner: Arc<ControllerInner<B>>,
}

struct ControllerInner<B> {
    backend: B,
    store: Arc<DataStore>,
    activity: Activity,
}

impl<B: Backend> Clone for Controller<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Controller<ApiClient> {
    /// Build a controller backed by the HTTP client described by `config`.
    ///
    /// No request is made; call [`load()`](Self::load) to populate the store.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CoreError> {
        let client = ApiClient::new(config.api_url.as_str(), &config.transport())?;
        debug!(url = %config.api_url, "controller configured");
        Ok(Self::new(client))
    }
}

impl<B: Backend> Controller<B> {
    pub fn new(backend: B) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                backend,
                store: Arc::new(DataStore::new()),
                activity: Activity::new(),
            }),
        }
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    // ── Producers ────────────────────────────────────────────────

    /// Replace the local collection with the server's, in server order.
    ///
    /// On failure the previous collection is left untouched.
    pub async fn load(&self) -> Result<Snapshot<Producer>, CoreError> {
        let op = Operation::LoadProducers;
        self.begin(op);

        let producers = self.remote(op, self.inner.backend.list_producers()).await?;
        let count = producers.len();
        self.inner.store.apply_load(producers);
        info!(count, "producers loaded");
        Ok(self.inner.store.producers_snapshot())
    }

    /// Validate and create a producer, appending the server's record.
    pub async fn create(&self, draft: &ProducerDraft) -> Result<Producer, CoreError> {
        let op = Operation::CreateProducer;
        self.begin(op);
        validate_draft(draft).map_err(|e| self.fail(op, e.into()))?;

        let created = self
            .remote(op, self.inner.backend.create_producer(draft))
            .await?;
        info!(id = %created.id, name = %created.name, "producer created");
        self.inner.store.apply_created(created.clone());
        Ok(created)
    }

    /// Local lookup. Never performs I/O.
    pub fn read(&self, id: ProducerId) -> Option<Arc<Producer>> {
        self.inner.store.producer(id)
    }

    /// Like [`read`](Self::read), but an absent id is an error.
    pub fn require(&self, id: ProducerId) -> Result<Arc<Producer>, CoreError> {
        self.read(id)
            .ok_or_else(|| CoreError::ProducerNotFound { id: id.to_string() })
    }

    /// Validate and apply a partial update.
    ///
    /// The local record is replaced wholesale by the canonical record the
    /// server returns; nothing from the patch is merged in locally.
    pub async fn update(
        &self,
        id: ProducerId,
        patch: &ProducerPatch,
    ) -> Result<Producer, CoreError> {
        let op = Operation::UpdateProducer;
        self.begin(op);
        let current = self.inner.store.producer(id);
        validate_patch(patch, current.as_deref()).map_err(|e| self.fail(op, e.into()))?;

        let updated = self
            .remote(op, self.inner.backend.update_producer(id, patch))
            .await?;
        if self.inner.store.apply_updated(updated.clone()) {
            info!(%id, "producer updated");
        } else {
            debug!(%id, "updated producer is not held locally");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: ProducerId) -> Result<(), CoreError> {
        let op = Operation::DeleteProducer;
        self.begin(op);

        self.remote(op, self.inner.backend.delete_producer(id))
            .await?;
        self.inner.store.apply_deleted(id);
        info!(%id, "producer deleted");
        Ok(())
    }

    // ── Cultures ─────────────────────────────────────────────────

    /// Create a culture for `producer_id`.
    ///
    /// When the owner isn't held locally the remote creation still stands
    /// but the local collection is not touched; call `load()` to resync.
    pub async fn add_culture(
        &self,
        producer_id: ProducerId,
        draft: &CultureDraft,
    ) -> Result<Culture, CoreError> {
        let op = Operation::AddCulture;
        self.begin(op);
        validate_culture(draft).map_err(|e| self.fail(op, e.into()))?;

        let culture = self
            .remote(op, self.inner.backend.create_culture(producer_id, draft))
            .await?;
        if self.inner.store.apply_culture_added(culture.clone()) {
            info!(%producer_id, culture = %culture.id, "culture added");
        } else {
            warn!(%producer_id, culture = %culture.id, "culture created for a producer not held locally");
        }
        Ok(culture)
    }

    pub async fn remove_culture(
        &self,
        producer_id: ProducerId,
        culture_id: CultureId,
    ) -> Result<(), CoreError> {
        let op = Operation::RemoveCulture;
        self.begin(op);

        self.remote(
            op,
            self.inner.backend.delete_culture(producer_id, culture_id),
        )
        .await?;
        if self
            .inner
            .store
            .apply_culture_removed(producer_id, culture_id)
        {
            info!(%producer_id, culture = %culture_id, "culture removed");
        } else {
            debug!(%producer_id, culture = %culture_id, "removed culture is not held locally");
        }
        Ok(())
    }

    // ── Dashboard ────────────────────────────────────────────────

    /// Fetch the server-side aggregate. Returned as-is and published to
    /// [`subscribe_dashboard()`](Self::subscribe_dashboard).
    pub async fn dashboard(&self) -> Result<DashboardSummary, CoreError> {
        let op = Operation::LoadDashboard;
        self.begin(op);

        let summary = self.remote(op, self.inner.backend.dashboard()).await?;
        debug!(total_farms = summary.total_farms, "dashboard loaded");
        self.inner.store.apply_dashboard(summary.clone());
        Ok(summary)
    }

    /// The most recently fetched dashboard summary.
    pub fn dashboard_summary(&self) -> Option<Arc<DashboardSummary>> {
        self.inner.store.dashboard()
    }

    pub fn subscribe_dashboard(&self) -> watch::Receiver<Option<Arc<DashboardSummary>>> {
        self.inner.store.subscribe_dashboard()
    }

    // ── Command execution ────────────────────────────────────────

    /// Run a write command and wrap its outcome.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        debug!(operation = cmd.operation().as_str(), "executing command");
        match cmd {
            Command::CreateProducer(draft) => self.create(&draft).await.map(CommandResult::Producer),
            Command::UpdateProducer { id, patch } => {
                self.update(id, &patch).await.map(CommandResult::Producer)
            }
            Command::DeleteProducer { id } => self.delete(id).await.map(|()| CommandResult::Ok),
            Command::AddCulture { producer_id, draft } => self
                .add_culture(producer_id, &draft)
                .await
                .map(CommandResult::Culture),
            Command::RemoveCulture {
                producer_id,
                culture_id,
            } => self
                .remove_culture(producer_id, culture_id)
                .await
                .map(|()| CommandResult::Ok),
        }
    }

    // ── State observation ────────────────────────────────────────

    pub fn producers_snapshot(&self) -> Snapshot<Producer> {
        self.inner.store.producers_snapshot()
    }

    pub fn subscribe_producers(&self) -> EntityStream<Producer> {
        self.inner.store.subscribe_producers()
    }

    /// Number of remote calls currently outstanding.
    pub fn in_flight(&self) -> usize {
        self.inner.activity.in_flight()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn subscribe_in_flight(&self) -> watch::Receiver<usize> {
        self.inner.activity.subscribe_in_flight()
    }

    /// User-facing message of the most recent failure, cleared whenever
    /// an operation starts. Last writer wins across concurrent calls.
    pub fn last_error(&self) -> Option<String> {
        self.inner.activity.last_error()
    }

    pub fn subscribe_last_error(&self) -> watch::Receiver<Option<String>> {
        self.inner.activity.subscribe_last_error()
    }

    // ── Private helpers ──────────────────────────────────────────

    fn begin(&self, op: Operation) {
        debug!(operation = op.as_str(), "operation started");
        self.inner.activity.reset_error();
    }

    /// Await one backend call while it counts as in flight.
    async fn remote<T>(
        &self,
        op: Operation,
        call: impl Future<Output = Result<T, ruralis_api::Error>>,
    ) -> Result<T, CoreError> {
        let result = {
            let _guard = self.inner.activity.begin();
            call.await
        };
        result.map_err(|e| self.fail(op, e.into()))
    }

    /// Record a failure in the last-error slot and hand it back.
    fn fail(&self, op: Operation, err: CoreError) -> CoreError {
        warn!(operation = op.as_str(), error = %err, "operation failed");
        self.inner.activity.record_error(err.user_message(op));
        err
    }
}
