//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ruralis_config::ConfigError;
use ruralis_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const VALIDATION: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the producer service at {url}")]
    #[diagnostic(
        code(ruralis::connection_failed),
        help(
            "Check that the service is running and reachable.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(ruralis::timeout),
        help("Increase the timeout with --timeout or check the service's responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(ruralis::not_found),
        help("Run: ruralis {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Remote ───────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(ruralis::rejected), help("The service answered with HTTP {status}."))]
    Rejected { status: u16, message: String },

    // ── Validation ───────────────────────────────────────────────────
    /// The record breaks a registry rule; nothing was sent.
    #[error("{message}")]
    #[diagnostic(code(ruralis::invalid_record))]
    InvalidRecord { message: String },

    /// A flag or input file is malformed.
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ruralis::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No API URL configured")]
    #[diagnostic(
        code(ruralis::no_api_url),
        help(
            "Create a profile with: ruralis config init\n\
             Or pass --api-url / set RURALIS_API_URL.\n\
             Config file: {path}"
        )
    )]
    NoApiUrl { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ruralis::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ruralis config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(ruralis::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(ruralis::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Internal / IO ────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(ruralis::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(ruralis::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } | Self::Rejected { status: 404, .. } => exit_code::NOT_FOUND,
            Self::InvalidRecord { .. } => exit_code::VALIDATION,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NoApiUrl { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => CliError::InvalidRecord {
                message: errors.to_string(),
            },
            CoreError::Network { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout => CliError::Timeout,
            CoreError::Rejected { status, detail } => CliError::Rejected {
                status,
                message: detail.unwrap_or_else(|| format!("Request rejected (HTTP {status})")),
            },
            CoreError::ProducerNotFound { id } => CliError::NotFound {
                resource_type: "producer".into(),
                identifier: id,
                list_command: "producers list".into(),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingApiUrl { .. } => CliError::NoApiUrl {
                path: ruralis_config::config_path().display().to_string(),
            },
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_distinct_exit_codes() {
        let cases = [
            (
                CoreError::from(ruralis_core::ValidationError::InvalidTaxId { digits: 5 }),
                exit_code::VALIDATION,
            ),
            (
                CoreError::Network {
                    url: "http://localhost".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (CoreError::Timeout, exit_code::TIMEOUT),
            (
                CoreError::Rejected {
                    status: 404,
                    detail: None,
                },
                exit_code::NOT_FOUND,
            ),
            (
                CoreError::Rejected {
                    status: 400,
                    detail: Some("CPF/CNPJ já cadastrado".into()),
                },
                exit_code::GENERAL,
            ),
            (
                CoreError::ProducerNotFound { id: "9".into() },
                exit_code::NOT_FOUND,
            ),
        ];
        for (core, expected) in cases {
            assert_eq!(CliError::from(core).exit_code(), expected);
        }
    }

    #[test]
    fn rejection_shows_server_detail() {
        let err = CliError::from(CoreError::Rejected {
            status: 400,
            detail: Some("CPF/CNPJ já cadastrado".into()),
        });
        assert_eq!(err.to_string(), "CPF/CNPJ já cadastrado");
    }
}
