// ruralis-api: Async Rust client for the rural producer registry HTTP API

pub mod client;
mod dashboard;
pub mod error;
mod producers;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
