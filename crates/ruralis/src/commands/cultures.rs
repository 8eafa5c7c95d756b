//! Culture command handlers.

use ruralis_core::{Controller, CultureDraft};

use crate::cli::{CulturesArgs, CulturesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    controller: &Controller,
    args: CulturesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CulturesCommand::Add {
            producer_id,
            crop_year,
            name,
        } => {
            let draft = CultureDraft::new(crop_year, name);
            let culture = controller.add_culture(producer_id, &draft).await?;
            let out = output::render_single(
                &global.output,
                &culture,
                |c| {
                    format!(
                        "Culture {} added to producer {}: {} ({})",
                        c.id, c.producer_id, c.name, c.crop_year
                    )
                },
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CulturesCommand::Remove {
            producer_id,
            culture_id,
        } => {
            controller.remove_culture(producer_id, culture_id).await?;
            if !global.quiet {
                eprintln!("Culture {culture_id} removed from producer {producer_id}");
            }
            Ok(())
        }
    }
}
