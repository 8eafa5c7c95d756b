// ── Domain model ──
//
// Canonical types the store holds and consumers render. Wire shapes from
// `ruralis-api` are converted into these in `convert.rs`.

pub mod dashboard;
pub mod ids;
pub mod producer;

pub use dashboard::{DashboardSummary, SoilUse};
pub use ids::{CultureId, ProducerId};
pub use producer::{Culture, Producer};

/// Entities the store indexes by a server-assigned identifier.
pub trait Keyed {
    type Key: Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static;

    fn key(&self) -> Self::Key;
}

impl Keyed for Producer {
    type Key = ProducerId;

    fn key(&self) -> ProducerId {
        self.id
    }
}

impl Keyed for Culture {
    type Key = CultureId;

    fn key(&self) -> CultureId {
        self.id
    }
}
