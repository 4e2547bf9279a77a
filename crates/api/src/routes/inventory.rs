//! Warehouse stock endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use persistence::repositories::{InventoryRepository, WarehouseRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::inventory::{InventoryEntry, SetStockRequest, WarehouseInventoryResponse};

async fn ensure_warehouse(state: &AppState, id: i64) -> Result<(), ApiError> {
    if WarehouseRepository::new(&state.db).exists(id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("Warehouse {} not found", id)))
    }
}

/// List the stock held by a warehouse.
///
/// GET /api/warehouses/:id/inventory
pub async fn list_warehouse_inventory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WarehouseInventoryResponse>, ApiError> {
    ensure_warehouse(&state, id).await?;

    let repo = InventoryRepository::new(state.db.pool().clone());
    let entries = repo
        .list_for_warehouse(id)
        .await?
        .into_iter()
        .map(InventoryEntry::from)
        .collect();

    Ok(Json(WarehouseInventoryResponse::new(id, entries)))
}

/// Set the stock level of one item in a warehouse.
///
/// PUT /api/warehouses/:id/inventory/:item_id
pub async fn set_stock(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(i64, i64)>,
    Json(request): Json<SetStockRequest>,
) -> Result<Json<InventoryEntry>, ApiError> {
    request.validate()?;
    ensure_warehouse(&state, id).await?;

    let repo = InventoryRepository::new(state.db.pool().clone());
    let entry: InventoryEntry = repo
        .set_quantity(id, item_id, request.quantity)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::NotFound(_) => ApiError::NotFound(format!("Item {} not found", item_id)),
            other => other,
        })?
        .into();

    info!(
        warehouse_id = id,
        item_id,
        quantity = entry.quantity,
        "Stock level set"
    );

    Ok(Json(entry))
}
