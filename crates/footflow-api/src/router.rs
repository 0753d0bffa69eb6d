use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Catalogue
        .route("/api/v1/authorities", get(handlers::list_authorities))
        .route("/api/v1/authorities/availability", get(handlers::get_availability))
        .route("/api/v1/demands", get(handlers::list_demands))

        // Map for a selection
        .route("/api/v1/map", get(handlers::get_map))

        // Feedback
        .route("/api/v1/feedback", post(handlers::submit_feedback))

        .with_state(state)
}
