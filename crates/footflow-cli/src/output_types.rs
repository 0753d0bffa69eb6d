use footflow_core::map::LayerKind;
use footflow_core::models::FeedbackEntry;
use serde::Serialize;
use tabled::Tabled;

/// Output for catalog command without an authority
#[derive(Debug, Serialize)]
pub struct CatalogOutput {
    pub authorities: Vec<&'static str>,
    pub demands: Vec<DemandRow>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct DemandRow {
    #[tabled(rename = "Id")]
    pub id: &'static str,
    #[tabled(rename = "Demand")]
    pub label: &'static str,
    #[tabled(rename = "Dataset")]
    pub filename: &'static str,
    #[tabled(skip)]
    pub description: &'static [&'static str],
}

/// Output for catalog command with an authority
#[derive(Debug, Serialize)]
pub struct AvailabilityOutput {
    pub authority: String,
    pub data_dir: String,
    pub has_boundary: bool,
    pub categories: Vec<AvailabilityRow>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct AvailabilityRow {
    #[tabled(rename = "Demand")]
    pub label: &'static str,
    #[tabled(rename = "Dataset")]
    pub filename: &'static str,
    #[tabled(rename = "Available")]
    pub available: bool,
}

/// Output for a selection that resolved to nothing
#[derive(Debug, Serialize)]
pub struct NoDataOutput {
    pub authority: String,
    pub demand: String,
    pub message: String,
}

/// Output for render command when writing to a file
#[derive(Debug, Serialize)]
pub struct RenderOutput {
    pub authority: String,
    pub demand: String,
    pub output: String,
    pub layers: Vec<LayerSummary>,
}

#[derive(Debug, Serialize)]
pub struct LayerSummary {
    pub name: String,
    pub kind: LayerKind,
    pub features: usize,
}

/// Output for feedback command
#[derive(Debug, Serialize)]
pub struct FeedbackOutput {
    pub log: String,
    pub entry: FeedbackEntry,
}

/// One configuration value with its source
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
