//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    InventoryCategory, InventoryItem, InventoryItemCreate, InventoryItemUpdate, RestockRequest,
};
use crate::db::repository::InventoryRepository;
use crate::db::repository::inventory::InventoryFilter;
use crate::utils::validation::{MAX_NAME_LEN, validate_non_negative, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::{AppResponse, ListResponse};

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct InventoryListQuery {
    pub category: Option<InventoryCategory>,
    #[serde(rename = "lowStock")]
    pub low_stock: Option<bool>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// List inventory items with optional category / low-stock filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<InventoryListQuery>,
) -> AppResult<Json<ListResponse<InventoryItem>>> {
    let filter = InventoryFilter {
        category: query.category,
        low_stock_only: query.low_stock.unwrap_or(false),
        page: query.page,
        limit: query.limit,
    };

    let repo = InventoryRepository::new(state.get_db().clone());
    let (items, total) = repo.find_paged(&filter).await?;
    Ok(Json(ListResponse::new(
        items,
        total,
        filter.page.max(1),
        filter.limit.clamp(1, 100),
    )))
}

/// Everything at or below its minimum stock level
pub async fn low_stock(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<InventoryItem>>>> {
    let repo = InventoryRepository::new(state.get_db().clone());
    let items = repo.find_low_stock().await?;
    Ok(Json(AppResponse::success(items)))
}

/// Fetch one inventory item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<InventoryItem>>> {
    let repo = InventoryRepository::new(state.get_db().clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inventory item {} not found", id)))?;
    Ok(Json(AppResponse::success(item)))
}

/// Add an inventory item (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<Json<AppResponse<InventoryItem>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_non_negative(payload.current_stock, "current_stock")?;
    validate_non_negative(payload.min_stock_level, "min_stock_level")?;
    validate_non_negative(payload.cost_per_unit, "cost_per_unit")?;

    let repo = InventoryRepository::new(state.get_db().clone());
    let item = repo.create(payload).await?;
    tracing::info!(name = %item.name, "Inventory item created");
    Ok(Json(AppResponse::success(item)))
}

/// Edit an inventory item (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<AppResponse<InventoryItem>>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(stock) = payload.current_stock {
        validate_non_negative(stock, "current_stock")?;
    }
    if let Some(min) = payload.min_stock_level {
        validate_non_negative(min, "min_stock_level")?;
    }
    if let Some(cost) = payload.cost_per_unit {
        validate_non_negative(cost, "cost_per_unit")?;
    }

    let repo = InventoryRepository::new(state.get_db().clone());
    let item = repo.update(&id, payload).await?;
    Ok(Json(AppResponse::success(item)))
}

/// Add stock and stamp the restock time (admin)
pub async fn restock(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RestockRequest>,
) -> AppResult<Json<AppResponse<InventoryItem>>> {
    let repo = InventoryRepository::new(state.get_db().clone());
    let item = repo.restock(&id, payload.quantity).await?;
    tracing::info!(name = %item.name, quantity = payload.quantity, "Inventory restocked");
    Ok(Json(AppResponse::success_with_message(
        item,
        "Stock updated successfully",
    )))
}

/// Remove an inventory item (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = InventoryRepository::new(state.get_db().clone());
    repo.delete(&id).await?;
    tracing::info!(id = %id, "Inventory item deleted");
    Ok(Json(AppResponse::success_with_message(
        (),
        "Inventory item deleted",
    )))
}
