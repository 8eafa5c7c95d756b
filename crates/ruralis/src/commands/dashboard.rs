//! Dashboard command handler.

use tabled::Tabled;

use ruralis_core::{Controller, DashboardSummary};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Count")]
    count: u64,
}

fn count_table<'a>(entries: impl Iterator<Item = (&'a String, &'a u64)>) -> String {
    let rows: Vec<CountRow> = entries
        .map(|(name, count)| CountRow {
            name: name.clone(),
            count: *count,
        })
        .collect();
    if rows.is_empty() {
        return "  (none)".into();
    }
    output::render_table(&rows)
}

fn detail(d: &DashboardSummary, color: bool) -> String {
    [
        format!("Farms:        {}", d.total_farms),
        format!("Total area:   {}", util::hectares(d.total_hectares)),
        format!("Agricultural: {}", util::hectares(d.area_by_soil_use.agricultural)),
        format!("Vegetation:   {}", util::hectares(d.area_by_soil_use.vegetation)),
        String::new(),
        output::heading("Farms by state", color),
        count_table(d.farms_by_state.iter()),
        String::new(),
        output::heading("Cultures", color),
        count_table(d.cultures_summary.iter()),
    ]
    .join("\n")
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let summary = controller.dashboard().await?;
    let out = output::render_single(
        &global.output,
        &summary,
        |d| detail(d, color),
        |d| d.total_farms.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
