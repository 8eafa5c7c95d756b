//! Configuration for the ruralis CLI.
//!
//! TOML profiles, API token resolution (env + keyring + plaintext), and
//! translation to `ruralis_core::ClientConfig`. The CLI layers its own
//! flag overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use ruralis_core::{ClientConfig, TlsVerification};

const KEYRING_SERVICE: &str = "ruralis";
const ENV_PREFIX: &str = "RURALIS_";
/// Generic token variable, consulted after a profile's own `api_token_env`.
pub const TOKEN_ENV: &str = "RURALIS_API_TOKEN";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API URL configured (profile '{profile}'); set api_url or RURALIS_API_URL")]
    MissingApiUrl { profile: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named service profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named producer-service profile.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Service base URL (e.g., "http://localhost:8000").
    pub api_url: Option<String>,

    /// Bearer token (plaintext; prefer keyring or env var).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Environment variable name containing the bearer token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token_env: Option<String>,

    /// Path to custom CA certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override timeout, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Config {
    /// Name of the profile to use: explicit request, else `default_profile`,
    /// else `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Look up a profile. An explicitly requested name must exist.
    pub fn profile(&self, requested: Option<&str>) -> Result<Option<&Profile>, ConfigError> {
        let name = self.active_profile_name(requested);
        match (self.profiles.get(&name), requested) {
            (Some(profile), _) => Ok(Some(profile)),
            (None, Some(_)) => Err(ConfigError::UnknownProfile { name }),
            (None, None) => Ok(None),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("br", "ruralis", "ruralis").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ruralis");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// Nested keys use a double underscore in the environment, e.g.
/// `RURALIS_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the optional bearer token.
///
/// Order: the profile's `api_token_env`, `RURALIS_API_TOKEN`, the system
/// keyring (`ruralis` / `{profile}/api-token`), then plaintext config.
pub fn resolve_api_token(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's api_token_env → env var lookup
    if let Some(val) = profile
        .api_token_env
        .as_deref()
        .and_then(|name| std::env::var(name).ok())
    {
        return Some(SecretString::from(val));
    }

    // 2. Generic env var
    if let Ok(val) = std::env::var(TOKEN_ENV) {
        return Some(SecretString::from(val));
    }

    // 3. System keyring
    if let Some(secret) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-token"))
        .ok()
        .and_then(|entry| entry.get_password().ok())
    {
        return Some(SecretString::from(secret));
    }

    // 4. Plaintext in config
    profile.api_token.clone().map(SecretString::from)
}

/// Store a token in the system keyring for `profile_name`.
pub fn store_api_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-token"))
        .and_then(|entry| entry.set_password(token))
        .map_err(|e| ConfigError::Validation {
            field: "api_token".into(),
            reason: format!("keyring: {e}"),
        })
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `ClientConfig` from a profile, with global defaults filling
/// the gaps.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let raw = profile
        .api_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingApiUrl {
            profile: profile_name.into(),
        })?;
    let api_url: url::Url = raw.trim().parse().map_err(|e| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    if !matches!(api_url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("expected http or https, got '{}'", api_url.scheme()),
        });
    }

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = ClientConfig::new(api_url);
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.api_token = resolve_api_token(profile, profile_name);
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile(url: &str) -> Profile {
        Profile {
            api_url: Some(url.into()),
            ..Profile::default()
        }
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = profile_to_client_config(&Profile::default(), "default", &Defaults::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiUrl { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = profile_to_client_config(&profile("ftp://host"), "p", &Defaults::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_url"));
    }

    #[test]
    fn defaults_fill_timeout_and_tls() {
        let defaults = Defaults {
            insecure: true,
            timeout: 12,
            ..Defaults::default()
        };
        let config =
            profile_to_client_config(&profile("http://localhost:8000"), "p", &defaults).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn profile_overrides_defaults() {
        let mut p = profile("https://api.example.com");
        p.insecure = Some(false);
        p.ca_cert = Some(PathBuf::from("/etc/ruralis/ca.pem"));
        p.timeout = Some(3);
        let defaults = Defaults {
            insecure: true,
            ..Defaults::default()
        };

        let config = profile_to_client_config(&p, "p", &defaults).unwrap();

        assert_eq!(
            config.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/ruralis/ca.pem"))
        );
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn explicit_unknown_profile_is_an_error() {
        let config = Config::default();
        assert!(config.profile(None).unwrap().is_none());
        assert!(matches!(
            config.profile(Some("prod")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn active_profile_prefers_request() {
        let config = Config {
            default_profile: Some("lab".into()),
            ..Config::default()
        };
        assert_eq!(config.active_profile_name(Some("prod")), "prod");
        assert_eq!(config.active_profile_name(None), "lab");
    }
}
