//! Feedback command implementation

use crate::cli::FeedbackArgs;
use crate::commands::GlobalArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::FeedbackOutput;
use anyhow::{Context, Result};
use footflow_core::config::CliConfigOverrides;
use footflow_core::feedback::FeedbackService;
use footflow_core::models::FeedbackForm;
use footflow_store::CsvFeedbackLog;
use std::sync::Arc;

pub fn execute(args: FeedbackArgs, global: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(
        global.config.as_deref(),
        CliConfigOverrides {
            feedback_path: args.log,
            ..Default::default()
        },
    )?;

    let log_path = config.feedback_path.value;
    let service = FeedbackService::new(Arc::new(CsvFeedbackLog::new(log_path.clone())));

    let entry = service
        .submit(FeedbackForm::new(args.name, args.email, args.comments))
        .context("Failed to record feedback")?;

    if output.is_json() {
        return output.result(FeedbackOutput {
            log: log_path.display().to_string(),
            entry,
        });
    }

    output.success("Thank you for your feedback");
    output.kv("Saved to", log_path.display());
    Ok(())
}
