// ── Runtime connection configuration ──
//
// Describes *how* to reach the producer service. Never touches disk:
// the CLI (via ruralis-config) builds a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use ruralis_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Configuration for connecting to one producer service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., `http://localhost:8000`).
    pub api_url: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Optional bearer token.
    pub api_token: Option<SecretString>,
}

impl ClientConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            api_token: None,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            api_token: self.api_token.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn transport_mirrors_tls_and_timeout() {
        let mut config = ClientConfig::new("http://localhost:8000".parse().unwrap());
        config.tls = TlsVerification::DangerAcceptInvalid;
        config.timeout = Duration::from_secs(5);

        let transport = config.transport();
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert!(transport.api_token.is_none());
    }
}
