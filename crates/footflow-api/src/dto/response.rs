use chrono::{DateTime, Utc};
use footflow_core::models::FeedbackEntry;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "footflow-api",
        }
    }
}

/// Demand category as offered in the selection control
#[derive(Debug, Serialize)]
pub struct DemandInfo {
    pub id: String,
    pub label: &'static str,
    pub filename: &'static str,
    pub description: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct CategoryAvailability {
    pub id: String,
    pub label: &'static str,
    pub available: bool,
}

/// Which categories have data for an authority
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub authority: String,
    pub has_boundary: bool,
    pub categories: Vec<CategoryAvailability>,
}

/// Feedback submission response (201 Created)
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub entry: FeedbackEntry,
    pub received_at: DateTime<Utc>,
    pub message: String,
}

impl FeedbackResponse {
    pub fn recorded(entry: FeedbackEntry) -> Self {
        Self {
            success: true,
            entry,
            received_at: Utc::now(),
            message: "Thank you for your feedback".to_string(),
        }
    }
}
