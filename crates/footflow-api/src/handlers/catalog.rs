use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use footflow_core::models::{Authority, DemandCategory, AUTHORITIES};

use crate::dto::{AvailabilityQuery, AvailabilityResponse, CategoryAvailability, DemandInfo};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_authorities() -> Json<Vec<&'static str>> {
    Json(AUTHORITIES.to_vec())
}

pub async fn list_demands() -> Json<Vec<DemandInfo>> {
    Json(
        DemandCategory::ALL
            .iter()
            .map(|category| DemandInfo {
                id: category.short_name().to_string(),
                label: category.label(),
                filename: category.filename(),
                description: category.description(),
            })
            .collect(),
    )
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let authority = Authority::new(&query.authority)?;
    let availability = state.explorer.resolver().availability(&authority);

    tracing::info!(authority = %authority, "Checking dataset availability");

    Ok(Json(AvailabilityResponse {
        authority: authority.to_string(),
        has_boundary: availability.has_boundary,
        categories: availability
            .categories
            .iter()
            .map(|(category, present)| CategoryAvailability {
                id: category.short_name().to_string(),
                label: category.label(),
                available: availability.has_boundary && *present,
            })
            .collect(),
    }))
}
