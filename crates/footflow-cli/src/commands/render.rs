//! Render command implementation

use crate::cli::RenderArgs;
use crate::commands::GlobalArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{LayerSummary, NoDataOutput, RenderOutput};
use anyhow::{Context, Result};
use footflow_core::config::{parse_classification, CliConfigOverrides};
use footflow_core::map::{MapView, ViewportMode};
use footflow_core::models::{Authority, ClassificationStrategy, DemandCategory};
use footflow_core::{Exploration, Explorer};
use std::fs;

pub fn execute(args: RenderArgs, global: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let authority = Authority::new(&args.selection.authority)?;
    let category: DemandCategory = args.selection.demand.parse()?;

    let classification = match (args.quantiles, &args.breaks) {
        (Some(k), _) => {
            let strategy = ClassificationStrategy::Quantiles(k);
            strategy.validate()?;
            Some(strategy)
        }
        (None, Some(breaks)) => Some(parse_classification(&format!("fixed:{}", breaks))?),
        (None, None) => None,
    };

    let config = load_config_with_overrides(
        global.config.as_deref(),
        CliConfigOverrides {
            data_dir: global.data_dir.clone(),
            classification,
            viewport: args.fit_boundary.then_some(ViewportMode::FitBoundary),
            feedback_path: None,
        },
    )?;

    let explorer = Explorer::new(config.resolver(), config.map_settings());

    let view = match explorer.explore(&authority, category)? {
        Exploration::Map(view) => view,
        Exploration::NoData { message } => {
            if output.is_json() {
                return output.result(NoDataOutput {
                    authority: authority.to_string(),
                    demand: category.label().to_string(),
                    message,
                });
            }
            output.warning(message);
            return Ok(());
        }
    };

    let Some(path) = args.output else {
        return output.result(&view);
    };

    let json = serde_json::to_string_pretty(&view)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), layers = view.layers.len(), "Wrote map");

    if output.is_json() {
        return output.result(RenderOutput {
            authority: authority.to_string(),
            demand: category.label().to_string(),
            output: path.display().to_string(),
            layers: summarize(&view),
        });
    }

    output.success(format!("Wrote map to {}", path.display()));
    for layer in summarize(&view) {
        output.kv(&layer.name, format!("{:?}, {} features", layer.kind, layer.features));
    }
    if let Some(legend) = view.demand_layer().and_then(|layer| layer.legend.as_ref()) {
        output.kv("Legend", &legend.title);
    }

    Ok(())
}

fn summarize(view: &MapView) -> Vec<LayerSummary> {
    view.layers
        .iter()
        .map(|layer| LayerSummary {
            name: layer.name.clone(),
            kind: layer.kind,
            features: layer.features.features.len(),
        })
        .collect()
}
