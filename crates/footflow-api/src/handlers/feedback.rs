use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use footflow_core::models::FeedbackForm;

use crate::dto::FeedbackResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/v1/feedback - Record a feedback form submission
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Json(form): Json<FeedbackForm>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    let entry = tokio::task::spawn_blocking(move || state.feedback.submit(form)).await??;

    Ok((StatusCode::CREATED, Json(FeedbackResponse::recorded(entry))))
}
