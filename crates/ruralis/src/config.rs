//! CLI configuration: thin wrapper around `ruralis_config` shared types.
//!
//! Adds CLI-specific resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --api-token, --timeout, --insecure).

use secrecy::SecretString;

use ruralis_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ruralis_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
///
/// Flags (and their `RURALIS_*` env vars) win over the profile; the profile
/// wins over `[defaults]`.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = cfg.active_profile_name(global.profile.as_deref());

    let mut profile = match cfg.profile(global.profile.as_deref()) {
        Ok(found) => found.cloned().unwrap_or_default(),
        Err(ruralis_config::ConfigError::UnknownProfile { name }) => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(&cfg),
            });
        }
        Err(other) => return Err(other.into()),
    };

    if let Some(ref url) = global.api_url {
        profile.api_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }

    let mut client = ruralis_config::profile_to_client_config(&profile, &profile_name, &cfg.defaults)?;
    if let Some(ref token) = global.api_token {
        client.api_token = Some(SecretString::from(token.clone()));
    }
    tracing::debug!(
        profile = %profile_name,
        url = %client.api_url,
        insecure = client.tls == TlsVerification::DangerAcceptInvalid,
        timeout_secs = client.timeout.as_secs(),
        "resolved client config"
    );
    Ok(client)
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
