// ── Reactive data store ──
//
// Copy-on-write entity storage with push-based change notification.

mod collection;
mod data_store;
mod reconcile;

pub use collection::Snapshot;
pub use data_store::DataStore;
