//! Catalog command implementation

use crate::cli::CatalogArgs;
use crate::commands::GlobalArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{AvailabilityOutput, AvailabilityRow, CatalogOutput, DemandRow};
use anyhow::Result;
use footflow_core::config::CliConfigOverrides;
use footflow_core::models::{Authority, DemandCategory, AUTHORITIES};

pub fn execute(args: CatalogArgs, global: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    match args.authority {
        Some(name) => show_availability(&name, global, output),
        None => show_catalog(output),
    }
}

fn show_catalog(output: &OutputWriter) -> Result<()> {
    let demands: Vec<DemandRow> = DemandCategory::ALL
        .iter()
        .map(|c| DemandRow {
            id: c.short_name(),
            label: c.label(),
            filename: c.filename(),
            description: c.description(),
        })
        .collect();

    if output.is_json() {
        return output.result(CatalogOutput {
            authorities: AUTHORITIES.to_vec(),
            demands,
        });
    }

    output.section("Local Authorities");
    for name in AUTHORITIES.iter() {
        println!("  {}", name);
    }

    output.section("Demand Categories");
    for demand in &demands {
        println!("  {}", console::style(demand.label).bold());
        for note in demand.description {
            println!("    - {}", note);
        }
    }
    println!();
    output.table(demands)
}

fn show_availability(name: &str, global: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let authority = Authority::new(name)?;
    let config = load_config_with_overrides(
        global.config.as_deref(),
        CliConfigOverrides {
            data_dir: global.data_dir.clone(),
            ..Default::default()
        },
    )?;

    let resolver = config.resolver();
    let availability = resolver.availability(&authority);

    let rows: Vec<AvailabilityRow> = availability
        .categories
        .iter()
        .map(|(category, present)| AvailabilityRow {
            label: category.label(),
            filename: category.filename(),
            available: availability.has_boundary && *present,
        })
        .collect();

    if output.is_json() {
        return output.result(AvailabilityOutput {
            authority: authority.to_string(),
            data_dir: resolver.data_dir().display().to_string(),
            has_boundary: availability.has_boundary,
            categories: rows,
        });
    }

    output.section(format!("Datasets for {}", authority));
    output.kv("Data directory", resolver.data_dir().display());
    output.kv("Boundary", if availability.has_boundary { "present" } else { "missing" });
    output.table(rows)?;

    if !availability.has_boundary {
        output.warning("Without a boundary file no category can be shown");
    }

    Ok(())
}
