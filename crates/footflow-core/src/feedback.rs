//! Feedback form handling

use std::sync::Arc;

use crate::error::Result;
use crate::models::{FeedbackEntry, FeedbackForm};
use crate::ports::FeedbackLog;

/// Validates feedback submissions and records them in an injected log
#[derive(Clone)]
pub struct FeedbackService {
    log: Arc<dyn FeedbackLog>,
}

impl FeedbackService {
    pub fn new(log: Arc<dyn FeedbackLog>) -> Self {
        Self { log }
    }

    /// Validate and append a submission. An incomplete form is rejected
    /// before anything is written.
    pub fn submit(&self, form: FeedbackForm) -> Result<FeedbackEntry> {
        let entry = form.validate().inspect_err(|e| {
            tracing::info!(error = %e, "Rejected incomplete feedback");
        })?;

        self.log.append(&entry)?;
        tracing::info!(email = %entry.email, "Recorded feedback");
        Ok(entry)
    }

    pub fn entries(&self) -> Result<Vec<FeedbackEntry>> {
        self.log.entries()
    }
}
