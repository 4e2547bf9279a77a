//! Warehouse endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{NewWarehouse, WarehouseRepository};
use tracing::{error, info};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::record_created;
use domain::models::warehouse::{CreateWarehouseRequest, Warehouse, WarehouseResponse};

/// List all warehouses.
///
/// GET /api/warehouses
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> Result<Json<Vec<WarehouseResponse>>, ApiError> {
    let repo = WarehouseRepository::new(&state.db);
    let entities = repo.list().await.map_err(|e| {
        error!(error = %e, "Failed to list warehouses");
        ApiError::Internal(format!("Error fetching warehouses: {}", e))
    })?;

    let warehouses = entities
        .into_iter()
        .map(|e| WarehouseResponse::from(Warehouse::from(e)))
        .collect();

    Ok(Json(warehouses))
}

/// Get a single warehouse.
///
/// GET /api/warehouses/:id
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WarehouseResponse>, ApiError> {
    let repo = WarehouseRepository::new(&state.db);
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Warehouse {} not found", id)))?;

    Ok(Json(Warehouse::from(entity).into()))
}

/// Create a warehouse.
///
/// POST /api/warehouses
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(request): Json<CreateWarehouseRequest>,
) -> Result<(StatusCode, Json<WarehouseResponse>), ApiError> {
    request.validate()?;
    let location = request.point()?;

    let repo = WarehouseRepository::new(&state.db);
    let entity = repo
        .create(NewWarehouse {
            name: &request.name,
            location,
            address: request.address.as_deref(),
            capacity: request.capacity,
            status: &request.status,
            data: request.data,
        })
        .await?;

    let response: WarehouseResponse = Warehouse::from(entity).into();
    record_created("warehouse");

    info!(
        warehouse_id = response.id,
        name = %response.name,
        spatial = state.db.spatial().as_str(),
        "Warehouse created"
    );

    Ok((StatusCode::CREATED, Json(response)))
}
