//! Config command implementation

use crate::commands::GlobalArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;
use footflow_core::config::CliConfigOverrides;

pub fn execute(global: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(
        global.config.as_deref(),
        CliConfigOverrides {
            data_dir: global.data_dir.clone(),
            ..Default::default()
        },
    )?;

    let rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow {
            key,
            value,
            source: format!("{:?}", source),
        })
        .collect();

    output.section("Configuration Values");
    output.table(rows)?;

    if !output.is_json() {
        output.section("Configuration Precedence");
        output.info("CLI arguments > Environment variables > Config file > Defaults");
    }

    Ok(())
}
