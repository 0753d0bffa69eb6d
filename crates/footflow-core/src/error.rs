//! Error types for Footflow

use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::ResolutionError;

#[derive(Debug, Error)]
pub enum FootflowError {
    // Selection errors
    #[error("Unknown local authority: {name}")]
    UnknownAuthority { name: String },

    #[error("Unknown demand category: {name}")]
    UnknownDemand { name: String },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    // Dataset errors
    #[error("Schema mismatch in {dataset} at feature {feature}: {reason}")]
    SchemaMismatch {
        dataset: String,
        feature: usize,
        reason: String,
    },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    // Feedback errors
    #[error("Please fill in all fields. Missing: {}", missing.join(", "))]
    IncompleteFeedback { missing: Vec<&'static str> },

    #[error("Feedback log error: {0}")]
    FeedbackLog(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FootflowError {
    /// True when the selection simply has no data on disk
    pub fn is_no_data(&self) -> bool {
        matches!(self, FootflowError::Resolution(ResolutionError::NoData { .. }))
    }
}

pub type Result<T> = std::result::Result<T, FootflowError>;
