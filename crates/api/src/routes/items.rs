//! Item catalog endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::ItemRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::record_created;
use domain::models::item::{CreateItemRequest, Item, ListItemsResponse};

/// GET /api/items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<ListItemsResponse>, ApiError> {
    let repo = ItemRepository::new(state.db.pool().clone());
    let items: Vec<Item> = repo.list().await?.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(ListItemsResponse { items, total }))
}

/// GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, ApiError> {
    let repo = ItemRepository::new(state.db.pool().clone());
    let item = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item {} not found", id)))?;

    Ok(Json(item.into()))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    request.validate()?;

    let repo = ItemRepository::new(state.db.pool().clone());
    let item: Item = repo
        .create(
            &request.sku,
            &request.name,
            request.description.as_deref(),
            &request.unit,
            request.category.as_deref(),
        )
        .await?
        .into();

    record_created("item");
    info!(item_id = item.id, sku = %item.sku, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}
