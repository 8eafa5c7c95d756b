// ── Reactive entity streams ──
//
// Subscription types for consuming collection changes from the DataStore.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Keyed;
use crate::store::Snapshot;

/// A subscription to a collection of entities.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via the `changed()` method or by converting to a `Stream`.
pub struct EntityStream<T: Keyed + Send + Sync + 'static> {
    current: Snapshot<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Keyed + Send + Sync + 'static> EntityStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time (or at the last
    /// `changed()`).
    pub fn current(&self) -> &Snapshot<T> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Snapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the DataStore has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The first item is the snapshot current at conversion time.
    pub fn into_stream(self) -> EntityWatchStream<T> {
        EntityWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct EntityWatchStream<T: Keyed + Send + Sync + 'static> {
    inner: WatchStream<Snapshot<T>>,
}

impl<T: Keyed + Send + Sync + 'static> Stream for EntityWatchStream<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Arc<IndexMap<..>> is Unpin, so WatchStream is too.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures_util::StreamExt;

    use crate::model::{Producer, ProducerId};
    use crate::store::DataStore;

    fn producer(id: u64) -> Producer {
        Producer {
            id: ProducerId(id),
            tax_id: "12345678909".into(),
            name: format!("P{id}"),
            farm_name: "Fazenda".into(),
            city: "Sinop".into(),
            state: "MT".into(),
            total_area: 10.0,
            agricultural_area: 5.0,
            vegetation_area: 5.0,
            cultures: Vec::new(),
        }
    }

    #[tokio::test]
    async fn changed_yields_new_snapshot() {
        let store = DataStore::new();
        let mut stream = store.subscribe_producers();
        assert!(stream.current().is_empty());

        store.apply_load(vec![producer(1), producer(2)]);
        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(stream.current().len(), 2);
    }

    #[tokio::test]
    async fn into_stream_starts_with_current_state() {
        let store = DataStore::new();
        store.apply_load(vec![producer(1)]);

        let mut stream = store.subscribe_producers().into_stream();
        let first = stream.next().await.unwrap();
        assert_eq!(first.len(), 1);

        store.apply_created(producer(2));
        let second = stream.next().await.unwrap();
        assert!(second.contains_key(&ProducerId(2)));
    }
}
