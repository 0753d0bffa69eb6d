use crate::error::{FootflowError, Result};
use crate::map::{MapSettings, ViewportMode};
use crate::models::{ClassificationStrategy, RecipeBook};
use crate::resolver::LayerResolver;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Footflow
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub data_dir: ConfigValue<PathBuf>,
    pub dataset_extension: ConfigValue<String>,
    pub radius_divisor: ConfigValue<f64>,
    pub classification: ConfigValue<ClassificationStrategy>,
    pub viewport: ConfigValue<ViewportMode>,
    pub feedback_path: ConfigValue<PathBuf>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            data_dir: ConfigValue::new(PathBuf::from("."), ConfigSource::Default),
            dataset_extension: ConfigValue::new("geojson".to_string(), ConfigSource::Default),
            radius_divisor: ConfigValue::new(40.0, ConfigSource::Default),
            classification: ConfigValue::new(
                ClassificationStrategy::default(),
                ConfigSource::Default,
            ),
            viewport: ConfigValue::new(ViewportMode::Fixed, ConfigSource::Default),
            feedback_path: ConfigValue::new(PathBuf::from("feedback.csv"), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| FootflowError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| FootflowError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(data_dir) = file_config.data_dir {
            self.data_dir.update(data_dir, ConfigSource::File);
        }

        if let Some(extension) = file_config.dataset_extension {
            self.dataset_extension
                .update(extension.trim_start_matches('.').to_string(), ConfigSource::File);
        }

        if let Some(divisor) = file_config.radius_divisor {
            self.radius_divisor.update(validate_radius_divisor(divisor)?, ConfigSource::File);
        }

        if let Some(classification) = file_config.classification {
            classification.validate()?;
            self.classification.update(classification, ConfigSource::File);
        }

        if let Some(viewport) = file_config.viewport {
            self.viewport.update(viewport, ConfigSource::File);
        }

        if let Some(feedback_path) = file_config.feedback_path {
            self.feedback_path.update(feedback_path, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // FOOTFLOW_DATA_DIR
        if let Ok(dir) = env::var("FOOTFLOW_DATA_DIR") {
            self.data_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        // FOOTFLOW_DATASET_EXTENSION
        if let Ok(extension) = env::var("FOOTFLOW_DATASET_EXTENSION") {
            self.dataset_extension
                .update(extension.trim_start_matches('.').to_string(), ConfigSource::Environment);
        }

        // FOOTFLOW_RADIUS_DIVISOR
        if let Ok(divisor_str) = env::var("FOOTFLOW_RADIUS_DIVISOR") {
            match parse_radius_divisor(&divisor_str) {
                Ok(divisor) => self.radius_divisor.update(divisor, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FOOTFLOW_RADIUS_DIVISOR value '{}': expected a positive number",
                    divisor_str
                ),
            }
        }

        // FOOTFLOW_CLASSIFICATION
        if let Ok(strategy_str) = env::var("FOOTFLOW_CLASSIFICATION") {
            match parse_classification(&strategy_str) {
                Ok(strategy) => self.classification.update(strategy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FOOTFLOW_CLASSIFICATION value '{}': \
                     expected fixed:<b1,b2,...> or quantiles:<k>",
                    strategy_str
                ),
            }
        }

        // FOOTFLOW_VIEWPORT
        if let Ok(viewport_str) = env::var("FOOTFLOW_VIEWPORT") {
            match parse_viewport(&viewport_str) {
                Ok(viewport) => self.viewport.update(viewport, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FOOTFLOW_VIEWPORT value '{}': expected fixed or boundary",
                    viewport_str
                ),
            }
        }

        // FOOTFLOW_FEEDBACK_PATH
        if let Ok(path) = env::var("FOOTFLOW_FEEDBACK_PATH") {
            self.feedback_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir.update(data_dir, ConfigSource::Cli);
        }

        if let Some(classification) = overrides.classification {
            self.classification.update(classification, ConfigSource::Cli);
        }

        if let Some(viewport) = overrides.viewport {
            self.viewport.update(viewport, ConfigSource::Cli);
        }

        if let Some(feedback_path) = overrides.feedback_path {
            self.feedback_path.update(feedback_path, ConfigSource::Cli);
        }
    }

    /// Recipe constants from the effective configuration
    pub fn recipe_book(&self) -> RecipeBook {
        RecipeBook {
            radius_divisor: self.radius_divisor.value,
            classification: self.classification.value.clone(),
            ..RecipeBook::default()
        }
    }

    /// Resolver rooted at the configured data directory
    pub fn resolver(&self) -> LayerResolver {
        LayerResolver::new(&self.data_dir.value, self.dataset_extension.value.clone())
            .with_recipes(self.recipe_book())
    }

    pub fn map_settings(&self) -> MapSettings {
        MapSettings {
            viewport: self.viewport.value,
            ..MapSettings::default()
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert(
            "data_dir".to_string(),
            (self.data_dir.value.display().to_string(), self.data_dir.source),
        );

        map.insert(
            "dataset_extension".to_string(),
            (self.dataset_extension.value.clone(), self.dataset_extension.source),
        );

        map.insert(
            "radius_divisor".to_string(),
            (self.radius_divisor.value.to_string(), self.radius_divisor.source),
        );

        map.insert(
            "classification".to_string(),
            (describe_classification(&self.classification.value), self.classification.source),
        );

        map.insert(
            "viewport".to_string(),
            (format!("{:?}", self.viewport.value), self.viewport.source),
        );

        map.insert(
            "feedback_path".to_string(),
            (self.feedback_path.value.display().to_string(), self.feedback_path.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    dataset_extension: Option<String>,
    radius_divisor: Option<f64>,
    classification: Option<ClassificationStrategy>,
    viewport: Option<ViewportMode>,
    feedback_path: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub classification: Option<ClassificationStrategy>,
    pub viewport: Option<ViewportMode>,
    pub feedback_path: Option<PathBuf>,
}

/// Parse a classification strategy: `fixed:0,0.01,0.03` or `quantiles:3`
pub fn parse_classification(s: &str) -> Result<ClassificationStrategy> {
    let invalid = |reason: String| FootflowError::ConfigInvalid {
        key: "classification".to_string(),
        reason,
    };

    let (kind, args) = s.split_once(':').ok_or_else(|| {
        invalid(format!("Invalid classification: {}. Use fixed:<b1,b2,...> or quantiles:<k>", s))
    })?;

    let strategy = match kind.trim().to_lowercase().as_str() {
        "fixed" | "fixed_breaks" => {
            let breaks = args
                .split(',')
                .map(|b| b.trim().parse::<f64>())
                .collect::<std::result::Result<Vec<f64>, _>>()
                .map_err(|e| invalid(format!("Invalid break value in '{}': {}", args, e)))?;
            ClassificationStrategy::FixedBreaks(breaks)
        }
        "quantiles" => {
            let k = args
                .trim()
                .parse::<usize>()
                .map_err(|e| invalid(format!("Invalid quantile count '{}': {}", args, e)))?;
            ClassificationStrategy::Quantiles(k)
        }
        other => return Err(invalid(format!("Unknown classification scheme: {}", other))),
    };

    strategy.validate()?;
    Ok(strategy)
}

/// Parse viewport mode from string
pub fn parse_viewport(s: &str) -> Result<ViewportMode> {
    match s.to_lowercase().as_str() {
        "fixed" => Ok(ViewportMode::Fixed),
        "boundary" | "fit_boundary" | "fit-boundary" => Ok(ViewportMode::FitBoundary),
        _ => Err(FootflowError::ConfigInvalid {
            key: "viewport".to_string(),
            reason: format!("Invalid viewport mode: {}. Use fixed or boundary", s),
        }),
    }
}

/// Parse the bus marker radius divisor
pub fn parse_radius_divisor(s: &str) -> Result<f64> {
    let divisor = s.trim().parse::<f64>().map_err(|_| FootflowError::ConfigInvalid {
        key: "radius_divisor".to_string(),
        reason: format!("Invalid radius divisor: {}. Use a positive number", s),
    })?;
    validate_radius_divisor(divisor)
}

/// A radius divisor must be finite and positive
fn validate_radius_divisor(divisor: f64) -> Result<f64> {
    if divisor.is_finite() && divisor > 0.0 {
        Ok(divisor)
    } else {
        Err(FootflowError::ConfigInvalid {
            key: "radius_divisor".to_string(),
            reason: format!("Invalid radius divisor: {}. Use a positive number", divisor),
        })
    }
}

fn describe_classification(strategy: &ClassificationStrategy) -> String {
    match strategy {
        ClassificationStrategy::FixedBreaks(breaks) => format!(
            "fixed breaks [{}]",
            breaks.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(", ")
        ),
        ClassificationStrategy::Quantiles(k) => format!("quantiles (k={})", k),
    }
}
