//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuRepository;
use crate::db::repository::menu::MenuFilter;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_non_negative, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::{AppResponse, ListResponse};

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct MenuListQuery {
    pub category: Option<MenuCategory>,
    /// "true" limits the listing to available items
    pub available: Option<bool>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// List menu items with optional category/availability filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuListQuery>,
) -> AppResult<Json<ListResponse<MenuItem>>> {
    let filter = MenuFilter {
        category: query.category,
        available_only: query.available.unwrap_or(false),
        page: query.page,
        limit: query.limit,
    };

    let repo = MenuRepository::new(state.get_db().clone());
    let (items, total) = repo.find_paged(&filter).await?;
    Ok(Json(ListResponse::new(
        items,
        total,
        filter.page.max(1),
        filter.limit.clamp(1, 100),
    )))
}

/// The categories currently present on the menu
pub async fn categories(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<MenuCategory>>>> {
    let repo = MenuRepository::new(state.get_db().clone());
    let categories = repo.distinct_categories().await?;
    Ok(Json(AppResponse::success(categories)))
}

/// Fetch one menu item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    let repo = MenuRepository::new(state.get_db().clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(AppResponse::success(item)))
}

/// Add a menu item (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    validate_menu_payload(&payload)?;

    let repo = MenuRepository::new(state.get_db().clone());
    let item = repo.create(payload).await?;
    tracing::info!(name = %item.name, "Menu item created");
    Ok(Json(AppResponse::success(item)))
}

/// Edit a menu item (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_non_negative(price, "price")?;
    }
    if let Some(prep) = payload.preparation_time {
        if prep < 0 {
            return Err(AppError::validation("preparation_time must be non-negative"));
        }
    }

    let repo = MenuRepository::new(state.get_db().clone());
    let item = repo.update(&id, payload).await?;
    Ok(Json(AppResponse::success(item)))
}

/// Remove a menu item (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = MenuRepository::new(state.get_db().clone());
    repo.delete(&id).await?;
    tracing::info!(id = %id, "Menu item deleted");
    Ok(Json(AppResponse::success_with_message(
        (),
        "Menu item deleted",
    )))
}

fn validate_menu_payload(payload: &MenuItemCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_non_negative(payload.price, "price")?;
    if payload.preparation_time < 0 {
        return Err(AppError::validation("preparation_time must be non-negative"));
    }
    Ok(())
}
