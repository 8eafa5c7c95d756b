//! Config subcommand handlers.

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_service_url(raw: &str) -> Result<url::Url, CliError> {
    let parsed: url::Url = raw.trim().parse().map_err(|e| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CliError::Validation {
            field: "api_url".into(),
            reason: format!("expected http or https, got '{}'", parsed.scheme()),
        });
    }
    Ok(parsed)
}

/// Replace plaintext tokens before the config is printed.
fn redacted(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.api_token.is_some() {
            profile.api_token = Some("********".into());
        }
    }
    cfg
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("ruralis configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config()?;

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(cfg.active_profile_name(global.profile.as_deref()))
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Service URL
            let api_url: String = Input::new()
                .with_prompt("Service URL")
                .default("http://localhost:8000".into())
                .validate_with(|input: &String| {
                    parse_service_url(input)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Timeout
            let timeout: u64 = Input::new()
                .with_prompt("Request timeout (seconds)")
                .default(cfg.defaults.timeout)
                .interact_text()
                .map_err(prompt_err)?;

            // 4. Optional bearer token
            let token = Password::new()
                .with_prompt("API token (leave empty if the service is open)")
                .allow_empty_password(true)
                .interact()
                .map_err(prompt_err)?;

            let api_token = if token.is_empty() {
                None
            } else {
                let store_choices = &[
                    "Store in system keyring (recommended)",
                    "Save to config file (plaintext)",
                ];
                let store_selection = Select::new()
                    .with_prompt("Where to store the API token?")
                    .items(store_choices)
                    .default(0)
                    .interact()
                    .map_err(prompt_err)?;

                if store_selection == 0 {
                    ruralis_config::store_api_token(&profile_name, &token)?;
                    eprintln!("   API token stored in system keyring");
                    None
                } else {
                    Some(token)
                }
            };

            // 5. Build profile and write
            let profile = Profile {
                api_url: Some(api_url),
                api_token,
                timeout: (timeout != cfg.defaults.timeout).then_some(timeout),
                ..Profile::default()
            };
            cfg.profiles.insert(profile_name.clone(), profile);
            if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }

            let written = config::save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", written.display());
            eprintln!("  Profile: {profile_name}");
            eprintln!("\n  Test it: ruralis producers list -p {profile_name}");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(config::load_config_or_default());
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|_| format!("{c:#?}")),
                |c| {
                    c.profiles
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}
