//! Shared helpers for command handlers.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use ruralis_core::{Controller, Producer, ProducerId};

use crate::error::CliError;

/// Look a producer up in the loaded snapshot.
pub fn require_producer(controller: &Controller, id: ProducerId) -> Result<Arc<Producer>, CliError> {
    Ok(controller.require(id)?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal the prompt cannot be shown, which is reported as a
/// missing `--yes`.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::NonInteractiveRequiresYes {
            action: action.into(),
        })
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

/// Format hectares for tables and detail views.
pub fn hectares(value: f64) -> String {
    format!("{value:.2} ha")
}
