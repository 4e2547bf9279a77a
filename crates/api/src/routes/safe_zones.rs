//! Safe zone endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{NewSafeZone, SafeZoneRepository};
use tracing::{error, info};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::record_created;
use domain::models::safe_zone::{CreateSafeZoneRequest, SafeZone, SafeZoneResponse};

/// List all safe zones.
///
/// GET /api/safe-zones
pub async fn list_safe_zones(
    State(state): State<AppState>,
) -> Result<Json<Vec<SafeZoneResponse>>, ApiError> {
    let repo = SafeZoneRepository::new(&state.db);
    let entities = repo.list().await.map_err(|e| {
        error!(error = %e, "Failed to list safe zones");
        ApiError::Internal(format!("Error fetching safe zones: {}", e))
    })?;

    Ok(Json(
        entities
            .into_iter()
            .map(|e| SafeZoneResponse::from(SafeZone::from(e)))
            .collect(),
    ))
}

/// Get a single safe zone.
///
/// GET /api/safe-zones/:id
pub async fn get_safe_zone(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SafeZoneResponse>, ApiError> {
    let repo = SafeZoneRepository::new(&state.db);
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Safe zone {} not found", id)))?;

    Ok(Json(SafeZone::from(entity).into()))
}

/// Create a safe zone.
///
/// POST /api/safe-zones
pub async fn create_safe_zone(
    State(state): State<AppState>,
    Json(request): Json<CreateSafeZoneRequest>,
) -> Result<(StatusCode, Json<SafeZoneResponse>), ApiError> {
    request.validate()?;
    let geometry = request.polygon()?;

    let repo = SafeZoneRepository::new(&state.db);
    let entity = repo
        .create(NewSafeZone {
            name: &request.name,
            geometry,
            capacity: request.capacity,
            capacity_type: &request.capacity_type,
            status: &request.status,
            data: request.data,
        })
        .await?;

    let response: SafeZoneResponse = SafeZone::from(entity).into();
    record_created("safe_zone");

    info!(
        safe_zone_id = response.id,
        name = %response.name,
        spatial = state.db.spatial().as_str(),
        "Safe zone created"
    );

    Ok((StatusCode::CREATED, Json(response)))
}
