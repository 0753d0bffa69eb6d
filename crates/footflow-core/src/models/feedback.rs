use serde::{Deserialize, Serialize};

use crate::error::{FootflowError, Result};

/// Raw feedback form input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub comments: String,
}

/// One validated feedback row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Comments")]
    pub comments: String,
}

impl FeedbackForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            comments: comments.into(),
        }
    }

    /// Check that every field is filled in (whitespace-only counts as empty)
    pub fn validate(self) -> Result<FeedbackEntry> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("comments", &self.comments),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(FootflowError::IncompleteFeedback { missing });
        }

        Ok(FeedbackEntry {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            comments: self.comments.trim().to_string(),
        })
    }
}
