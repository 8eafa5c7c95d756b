//! Local resource store between `ruralis-api` and its consumers.
//!
//! This crate owns the domain model, validation rules, and the reactive
//! in-memory mirror of the remote producer registry:
//!
//! - **[`Controller`]**: facade for every operation. Writes are validated
//!   locally, sent to the [`Backend`], and reconciled into the store only
//!   after the server confirms. Each call returns its own `Result`; an
//!   in-flight count and a last-error slot are kept for display.
//!
//! - **[`DataStore`]**: copy-on-write, insertion-ordered producer
//!   collection published through `tokio::sync::watch`. Reads never
//!   perform I/O.
//!
//! - **[`EntityStream<T>`]**: subscription handle vended by the store,
//!   with `current()` / `latest()` / `changed()` / `into_stream()`.
//!
//! - **[`validate`]**: pure checks for areas, tax identifiers, and
//!   required fields, run before any request is sent.

mod activity;
pub mod backend;
pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::Backend;
pub use command::requests::*;
pub use command::{Command, CommandResult, Operation};
pub use config::{ClientConfig, TlsVerification};
pub use controller::Controller;
pub use error::CoreError;
pub use store::{DataStore, Snapshot};
pub use stream::{EntityStream, EntityWatchStream};
pub use validate::{Field, ValidationError, ValidationErrors};

pub use model::{
    Culture, CultureId, DashboardSummary, Keyed, Producer, ProducerId, SoilUse,
};
