//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use footflow_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "footflow.toml";

/// Load layered configuration: defaults, file, environment
pub fn load_config(config_path: Option<&Path>) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    match config_path {
        Some(path) => {
            config = config
                .load_from_file(path)
                .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
        }
        None => {
            let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
            if implicit.is_file() {
                config = config
                    .load_from_file(&implicit)
                    .context("Failed to load footflow.toml")?;
            }
        }
    }

    Ok(config.load_from_env())
}

/// Load layered configuration with CLI overrides on top
pub fn load_config_with_overrides(
    config_path: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_config(config_path)?;
    config.update_from_cli(overrides);
    Ok(config)
}
