use thiserror::Error;

/// Top-level error type for the `ruralis-api` crate.
///
/// Separates the two ways a request can fail once it leaves the process:
/// nothing came back (`Transport`), or the server answered with an error
/// status (`Remote`). `ruralis-core` maps these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Bearer token could not be encoded as a header value.
    #[error("Invalid API token: {0}")]
    InvalidToken(String),

    // ── Remote ──────────────────────────────────────────────────────
    /// The server answered with a non-2xx status.
    ///
    /// `detail` carries the server-supplied human-readable message, when
    /// the body had one.
    #[error("Remote error (HTTP {status}){}", detail_suffix(.detail))]
    Remote { status: u16, detail: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

#[allow(clippy::ref_option)]
fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl Error {
    /// Returns `true` if no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(e) if e.status().is_none())
    }

    /// Returns `true` if the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Remote { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Server-supplied detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Remote { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a remote rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
