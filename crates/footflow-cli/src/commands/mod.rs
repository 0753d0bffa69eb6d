//! Command implementations

mod catalog;
mod config;
mod feedback;
mod render;
mod resolve;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let global = GlobalArgs {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    match cli.command {
        Commands::Catalog(args) => catalog::execute(args, &global, &output),
        Commands::Resolve(args) => resolve::execute(args, &global, &output),
        Commands::Render(args) => render::execute(args, &global, &output),
        Commands::Feedback(args) => feedback::execute(args, &global, &output),
        Commands::Config => config::execute(&global, &output),
    }
}

/// Global flags shared by every command
pub struct GlobalArgs {
    pub config: Option<std::path::PathBuf>,
    pub data_dir: Option<std::path::PathBuf>,
}
