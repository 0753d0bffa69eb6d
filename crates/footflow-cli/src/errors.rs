use console::style;
use footflow_core::error::FootflowError;
use footflow_core::models::{DemandCategory, AUTHORITIES};
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn unknown_authority(name: &str) -> CliError {
    CliError::new("Unknown local authority")
        .with_context(format!(
            "'{}' is not one of the supported authorities.\n\nSupported: {}",
            name,
            AUTHORITIES.join(", ")
        ))
        .with_suggestion("Check the spelling; names are matched case-insensitively")
        .with_suggestion("List authorities: footflow catalog")
}

pub fn unknown_demand(name: &str) -> CliError {
    let known: Vec<String> = DemandCategory::ALL
        .iter()
        .map(|c| format!("{} ({})", c.short_name(), c.label()))
        .collect();

    CliError::new("Unknown demand category")
        .with_context(format!(
            "'{}' is not a demand category.\n\nKnown: {}",
            name,
            known.join(", ")
        ))
        .with_suggestion("Use the short name, e.g. --demand bus")
        .with_help("Run: footflow catalog")
}

pub fn schema_mismatch(dataset: &str, feature: usize, reason: &str) -> CliError {
    CliError::new("Dataset does not match its schema")
        .with_context(format!("Dataset: {}\nFeature: {}\nReason: {}", dataset, feature, reason))
        .with_suggestion("Re-export the dataset with the expected attributes")
        .with_help("Run: footflow resolve --help")
}

pub fn incomplete_feedback(missing: &[&str]) -> CliError {
    let flags: Vec<String> = missing.iter().map(|field| format!("--{}", field)).collect();

    CliError::new("Please fill in all fields.")
        .with_context(format!("Missing: {}", missing.join(", ")))
        .with_suggestion(format!("Provide {}", flags.join(" ")))
        .with_help("Run: footflow feedback --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check footflow.toml or the file passed with --config")
        .with_suggestion("Check FOOTFLOW_* environment variables")
        .with_help("Run: footflow config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(footflow_error) = error.chain().find_map(|e| e.downcast_ref::<FootflowError>()) {
        return match footflow_error {
            FootflowError::UnknownAuthority { name } => unknown_authority(name),
            FootflowError::UnknownDemand { name } => unknown_demand(name),
            FootflowError::SchemaMismatch { dataset, feature, reason } => {
                schema_mismatch(dataset, *feature, reason)
            }
            FootflowError::IncompleteFeedback { missing } => incomplete_feedback(missing),
            FootflowError::ConfigInvalid { key, reason } => invalid_config(key, reason),
            other => CliError::new(other.to_string()).with_context(format!("Error: {:#}", error)),
        };
    }

    let message = error.to_string();

    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {:#}", error))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {:#}", error))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(format!("{:#}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_authority_lists_supported() {
        let unknown = FootflowError::UnknownAuthority {
            name: "Atlantis".into(),
        };
        let error = from_anyhow(unknown.into());
        assert_eq!(error.message, "Unknown local authority");
        assert!(error.context.unwrap().contains("Barking and Dagenham"));
    }

    #[test]
    fn test_incomplete_feedback_names_flags() {
        let incomplete = FootflowError::IncompleteFeedback {
            missing: vec!["email"],
        };
        let error =
            from_anyhow(anyhow::Error::new(incomplete).context("Failed to record feedback"));
        assert_eq!(error.message, "Please fill in all fields.");
        assert_eq!(error.suggestions, vec!["Provide --email".to_string()]);
    }
}
