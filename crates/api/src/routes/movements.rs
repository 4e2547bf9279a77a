//! Inventory movement audit endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{MovementRepository, NewMovement, DEFAULT_MOVEMENT_LIMIT};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::record_created;
use domain::models::movement::{
    CreateMovementRequest, ListMovementsQuery, ListMovementsResponse, Movement,
};

/// Record a movement in the audit log. Stock levels are left unchanged.
///
/// POST /api/movements
pub async fn record_movement(
    State(state): State<AppState>,
    Json(request): Json<CreateMovementRequest>,
) -> Result<(StatusCode, Json<Movement>), ApiError> {
    request.validate()?;
    request.check_endpoints()?;

    let repo = MovementRepository::new(state.db.pool().clone());
    let movement: Movement = repo
        .record(NewMovement {
            item_id: request.item_id,
            quantity: request.quantity,
            from_warehouse_id: request.from_warehouse_id,
            to_warehouse_id: request.to_warehouse_id,
            movement_type: request.movement_type,
            performed_by: request.performed_by,
            note: request.note.as_deref(),
            data: request.data,
        })
        .await?
        .into();

    record_created("movement");
    info!(
        movement_id = movement.id,
        item_id = movement.item_id,
        movement_type = movement.movement_type.as_str(),
        quantity = movement.quantity,
        "Movement recorded"
    );

    Ok((StatusCode::CREATED, Json(movement)))
}

/// List movements, newest first.
///
/// GET /api/movements?warehouse_id=<id>&limit=<n>
pub async fn list_movements(
    State(state): State<AppState>,
    Query(query): Query<ListMovementsQuery>,
) -> Result<Json<ListMovementsResponse>, ApiError> {
    let repo = MovementRepository::new(state.db.pool().clone());
    let movements: Vec<Movement> = repo
        .list(query.warehouse_id, query.limit.unwrap_or(DEFAULT_MOVEMENT_LIMIT))
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = movements.len();

    Ok(Json(ListMovementsResponse { movements, total }))
}
