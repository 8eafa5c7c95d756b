// ── Core error types ──
//
// User-facing errors from ruralis-core. Consumers never see reqwest or
// JSON parse failures directly; `From<ruralis_api::Error>` folds them into
// the three categories the store reports: validation, network, rejection.

use thiserror::Error;

use crate::command::Operation;
use crate::validate::{ValidationError, ValidationErrors};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Pre-flight ───────────────────────────────────────────────────
    /// Structural violation caught before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    // ── Remote ───────────────────────────────────────────────────────
    /// No response received.
    #[error("Cannot reach {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    /// The server answered with an error status.
    #[error("Rejected by server (HTTP {status}){}", detail_suffix(.detail))]
    Rejected { status: u16, detail: Option<String> },

    // ── Local ────────────────────────────────────────────────────────
    #[error("Producer not found: {id}")]
    ProducerNotFound { id: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[allow(clippy::ref_option)]
fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl CoreError {
    /// The string stored in the store's last-error slot.
    ///
    /// Validation messages and server-supplied details are shown verbatim;
    /// everything else falls back to the operation's generic message.
    pub fn user_message(&self, op: Operation) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => op.fallback_message().to_owned(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout)
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.into())
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ruralis_api::Error> for CoreError {
    fn from(err: ruralis_api::Error) -> Self {
        match err {
            ruralis_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if let Some(status) = e.status() {
                    CoreError::Rejected {
                        status: status.as_u16(),
                        detail: None,
                    }
                } else {
                    CoreError::Network {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            ruralis_api::Error::Remote { status, detail } => CoreError::Rejected { status, detail },
            ruralis_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ruralis_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            ruralis_api::Error::InvalidToken(msg) => CoreError::Config {
                message: format!("Invalid API token: {msg}"),
            },
            ruralis_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
