use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use footflow_core::map::MapView;
use footflow_core::models::{Authority, DemandCategory};
use footflow_core::Exploration;

use crate::dto::MapQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/map - Map description for a selection
pub async fn get_map(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapView>, ApiError> {
    let authority = Authority::new(&query.authority)?;
    let category: DemandCategory = query.demand.parse()?;

    tracing::info!(authority = %authority, category = %category, "Processing map request");

    // Large polygon layers take tens of seconds to load.
    let exploration =
        tokio::task::spawn_blocking(move || state.explorer.explore(&authority, category))
            .await?
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to build map");
                ApiError::from(e)
            })?;

    match exploration {
        Exploration::Map(view) => Ok(Json(*view)),
        Exploration::NoData { message } => Err(ApiError::not_found(message)),
    }
}
