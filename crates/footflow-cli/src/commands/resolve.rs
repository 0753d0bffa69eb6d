//! Resolve command implementation

use crate::cli::SelectionArgs;
use crate::commands::GlobalArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::NoDataOutput;
use anyhow::Result;
use footflow_core::config::CliConfigOverrides;
use footflow_core::models::{Authority, DemandCategory, RenderRecipe};
use footflow_core::resolver::NO_DATA_MESSAGE;
use footflow_core::ResolutionError;

pub fn execute(args: SelectionArgs, global: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let authority = Authority::new(&args.authority)?;
    let category: DemandCategory = args.demand.parse()?;

    let config = load_config_with_overrides(
        global.config.as_deref(),
        CliConfigOverrides {
            data_dir: global.data_dir.clone(),
            ..Default::default()
        },
    )?;

    let spec = match config.resolver().resolve(&authority, category) {
        Ok(spec) => spec,
        Err(ResolutionError::NoData { .. }) => {
            if output.is_json() {
                return output.result(NoDataOutput {
                    authority: authority.to_string(),
                    demand: category.label().to_string(),
                    message: NO_DATA_MESSAGE.to_string(),
                });
            }
            output.warning(NO_DATA_MESSAGE);
            return Ok(());
        }
    };

    if output.is_json() {
        return output.result(spec);
    }

    output.section(format!("{} / {}", spec.authority, spec.category));
    output.kv("Dataset", spec.demand_path.display());
    output.kv("Boundary", spec.boundary_path.display());
    output.kv("Geometry", format!("{:?}", spec.geometry));

    match &spec.recipe {
        RenderRecipe::Markers(markers) => {
            output.kv("Encoding", "circle markers");
            output.kv("Radius", format!("weekly_demand / {}", markers.radius_divisor));
            output.kv("Color", &markers.color);
        }
        RenderRecipe::Choropleth(choropleth) => {
            output.kv("Encoding", "choropleth");
            output.kv("Attribute", &choropleth.attribute);
            output.kv("Classification", format!("{:?}", choropleth.strategy));
            output.kv("Color ramp", &choropleth.color_ramp);
        }
        RenderRecipe::Outline(outline) => {
            output.kv("Encoding", "outline");
            output.kv("Color", &outline.color);
            output.kv("Zoom to layer", outline.zoom_to_layer);
        }
    }

    Ok(())
}
