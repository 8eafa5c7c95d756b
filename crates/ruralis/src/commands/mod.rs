//! Command dispatch: bridges CLI args -> controller operations -> output formatting.

pub mod config_cmd;
pub mod cultures;
pub mod dashboard;
pub mod producers;
pub mod util;

use ruralis_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Producers(args) => producers::handle(controller, args, global).await,
        Command::Cultures(args) => cultures::handle(controller, args, global).await,
        Command::Dashboard => dashboard::handle(controller, global).await,
        // Handled in main before a controller exists
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions do not dispatch through the controller".into(),
        )),
    }
}
