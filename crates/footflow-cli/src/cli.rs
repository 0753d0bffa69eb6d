use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Footflow - explore footfall demand layers per local authority
#[derive(Parser, Debug)]
#[command(name = "footflow")]
#[command(about = "Explore footfall demand layers per local authority", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML); defaults to ./footflow.toml when present
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding one sub-directory per authority
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List authorities and demand categories, or dataset availability for one authority
    Catalog(CatalogArgs),

    /// Show which datasets and recipe a selection resolves to
    Resolve(SelectionArgs),

    /// Build the map for a selection and write it as JSON
    Render(RenderArgs),

    /// Record a feedback submission
    Feedback(FeedbackArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Show dataset availability for this authority
    #[arg(long)]
    pub authority: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Local authority name (e.g. "York")
    #[arg(long)]
    pub authority: String,

    /// Demand category: label ("Bus demand") or short name ("bus")
    #[arg(long)]
    pub demand: String,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Write the map to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Classify residential areas into k quantile classes
    #[arg(long, value_name = "K", conflicts_with = "breaks")]
    pub quantiles: Option<usize>,

    /// Classify residential areas with these ascending breaks (comma separated)
    #[arg(long, value_name = "B1,B2,...")]
    pub breaks: Option<String>,

    /// Center the initial view on the authority boundary
    #[arg(long)]
    pub fit_boundary: bool,
}

#[derive(Args, Debug)]
pub struct FeedbackArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub comments: String,

    /// Feedback log file (CSV)
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}
