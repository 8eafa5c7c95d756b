//! Producer command handlers.

use std::sync::Arc;

use tabled::Tabled;

use ruralis_core::{Controller, Producer, ProducerDraft, ProducerPatch};

use crate::cli::{
    GlobalOpts, ProducerCreateArgs, ProducerUpdateArgs, ProducersArgs, ProducersCommand,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProducerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "CPF/CNPJ")]
    tax_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Farm")]
    farm: String,
    #[tabled(rename = "City/State")]
    location: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Cultures")]
    cultures: String,
}

impl From<&Arc<Producer>> for ProducerRow {
    fn from(p: &Arc<Producer>) -> Self {
        Self {
            id: p.id.to_string(),
            tax_id: p.tax_id.clone(),
            name: p.name.clone(),
            farm: p.farm_name.clone(),
            location: format!("{}/{}", p.city, p.state),
            total: util::hectares(p.total_area),
            cultures: p.cultures.len().to_string(),
        }
    }
}

fn detail(p: &Producer, color: bool) -> String {
    let mut lines = vec![
        format!("ID:           {}", p.id),
        format!("CPF/CNPJ:     {}", p.tax_id),
        format!("Name:         {}", p.name),
        format!("Farm:         {}", p.farm_name),
        format!("City:         {}", p.city),
        format!("State:        {}", p.state),
        format!("Total area:   {}", util::hectares(p.total_area)),
        format!("Agricultural: {}", util::hectares(p.agricultural_area)),
        format!("Vegetation:   {}", util::hectares(p.vegetation_area)),
        format!("Unallocated:  {}", util::hectares(p.unallocated_area())),
    ];
    lines.push(String::new());
    lines.push(output::heading("Cultures", color));
    if p.cultures.is_empty() {
        lines.push("  (none)".into());
    }
    for c in &p.cultures {
        lines.push(format!("  [{}] {} ({})", c.id, c.name, c.crop_year));
    }
    lines.join("\n")
}

// ── Argument → request conversion ───────────────────────────────────

fn required<T>(value: Option<T>, flag: &str) -> Result<T, CliError> {
    value.ok_or_else(|| CliError::Validation {
        field: flag.into(),
        reason: "required when --from-file is not given".into(),
    })
}

fn draft_from_args(args: ProducerCreateArgs) -> Result<ProducerDraft, CliError> {
    if let Some(ref path) = args.from_file {
        return util::read_json_file(path);
    }
    Ok(ProducerDraft {
        tax_id: required(args.tax_id, "--tax-id")?,
        name: required(args.name, "--name")?,
        farm_name: required(args.farm_name, "--farm-name")?,
        city: required(args.city, "--city")?,
        state: required(args.state, "--state")?,
        total_area: required(args.total_area, "--total-area")?,
        agricultural_area: required(args.agricultural_area, "--agricultural-area")?,
        vegetation_area: required(args.vegetation_area, "--vegetation-area")?,
        cultures: args.cultures,
    })
}

fn patch_from_args(args: ProducerUpdateArgs) -> Result<ProducerPatch, CliError> {
    if let Some(ref path) = args.from_file {
        return util::read_json_file(path);
    }
    Ok(ProducerPatch {
        name: args.name,
        farm_name: args.farm_name,
        city: args.city,
        state: args.state,
        total_area: args.total_area,
        agricultural_area: args.agricultural_area,
        vegetation_area: args.vegetation_area,
        cultures: (!args.cultures.is_empty()).then_some(args.cultures),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: ProducersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        ProducersCommand::List => {
            let snap = controller.load().await?;
            let producers: Vec<Arc<Producer>> = snap.values().cloned().collect();
            let out = output::render_list(
                &global.output,
                &producers,
                |p| ProducerRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProducersCommand::Get { id } => {
            controller.load().await?;
            let producer = util::require_producer(controller, id)?;
            let out = output::render_single(
                &global.output,
                &producer,
                |p| detail(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProducersCommand::Create(args) => {
            let draft = draft_from_args(args)?;
            let created = controller.create(&draft).await?;
            let out = output::render_single(
                &global.output,
                &created,
                |p| detail(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProducersCommand::Update(args) => {
            let id = args.id;
            let patch = patch_from_args(args)?;
            if patch.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "no fields to change; pass at least one flag or --from-file".into(),
                });
            }
            // Area checks need the stored values for fields the patch omits
            controller.load().await?;
            util::require_producer(controller, id)?;

            let updated = controller.update(id, &patch).await?;
            let out = output::render_single(
                &global.output,
                &updated,
                |p| detail(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProducersCommand::Delete { id } => {
            controller.load().await?;
            let producer = util::require_producer(controller, id)?;
            let prompt = format!(
                "Delete producer {} ({}, farm '{}') and all its cultures?",
                producer.id, producer.name, producer.farm_name
            );
            if !util::confirm(&prompt, "producers delete", global.yes)? {
                return Ok(());
            }
            controller.delete(id).await?;
            if !global.quiet {
                eprintln!("Producer {id} deleted");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ruralis_core::{Culture, CultureDraft, CultureId, ProducerId};

    use super::*;

    fn producer() -> Producer {
        Producer {
            id: ProducerId(3),
            tax_id: "123.456.789-09".into(),
            name: "Maria".into(),
            farm_name: "Boa Vista".into(),
            city: "Sorriso".into(),
            state: "MT".into(),
            total_area: 100.0,
            agricultural_area: 60.0,
            vegetation_area: 30.0,
            cultures: vec![Culture {
                id: CultureId(8),
                producer_id: ProducerId(3),
                crop_year: "2024".into(),
                name: "Soja".into(),
            }],
        }
    }

    #[test]
    fn detail_lists_cultures_and_unallocated_area() {
        let text = detail(&producer(), false);
        assert!(text.contains("Unallocated:  10.00 ha"));
        assert!(text.contains("[8] Soja (2024)"));
    }

    #[test]
    fn update_without_cultures_leaves_them_untouched() {
        let args = ProducerUpdateArgs {
            id: ProducerId(3),
            from_file: None,
            name: Some("Ana".into()),
            farm_name: None,
            city: None,
            state: None,
            total_area: None,
            agricultural_area: None,
            vegetation_area: None,
            cultures: Vec::new(),
        };
        let patch = patch_from_args(args).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Ana"));
        assert!(patch.cultures.is_none());
        assert!(!patch.touches_areas());
    }

    #[test]
    fn create_flags_become_a_draft() {
        let args = ProducerCreateArgs {
            from_file: None,
            tax_id: Some("12.345.678/0001-95".into()),
            name: Some("Agro Ltda".into()),
            farm_name: Some("Santa Rita".into()),
            city: Some("Rio Verde".into()),
            state: Some("GO".into()),
            total_area: Some(500.0),
            agricultural_area: Some(300.0),
            vegetation_area: Some(150.0),
            cultures: vec![CultureDraft::new("2024", "Milho")],
        };
        let draft = draft_from_args(args).unwrap();
        assert_eq!(draft.state, "GO");
        assert_eq!(draft.cultures, vec![CultureDraft::new("2024", "Milho")]);
    }
}
