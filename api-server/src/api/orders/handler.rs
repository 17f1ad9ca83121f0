//! Orders API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate};
use crate::db::repository::order::OrderFilter;
use crate::db::repository::parse_id;
use crate::orders::OrderManager;
use crate::utils::AppResult;
use shared::{AppResponse, ListResponse, OrderStatus, OrderType, PaymentStatus};

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    #[serde(rename = "orderType")]
    pub order_type: Option<OrderType>,
    #[serde(rename = "paymentStatus")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// List orders. Customers only ever see their own; staff-side roles
/// see everything.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ListResponse<Order>>> {
    let customer = if user.role == Role::Customer {
        Some(parse_id("user", &user.id)?)
    } else {
        None
    };
    let filter = OrderFilter {
        customer,
        status: query.status,
        order_type: query.order_type,
        payment_status: query.payment_status,
        page: query.page,
        limit: query.limit,
    };

    let manager = OrderManager::new(state.get_db().clone());
    let (orders, total) = manager.list_orders(&filter).await?;
    Ok(Json(ListResponse::new(
        orders,
        total,
        filter.page.max(1),
        filter.limit.clamp(1, 100),
    )))
}

/// Fetch one order, scoped to the owner for customers
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let manager = OrderManager::new(state.get_db().clone());
    let order = if user.role == Role::Customer {
        let customer = parse_id("user", &user.id)?;
        manager.repository().find_owned(&id, &customer).await?
    } else {
        manager.repository().find_by_id(&id).await?
    };
    let order = order.ok_or(crate::orders::OrderError::NotFound)?;
    Ok(Json(AppResponse::success(order)))
}

/// Place an order
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<AppResponse<Order>>> {
    let customer = parse_id("user", &user.id)?;
    let manager = OrderManager::new(state.get_db().clone());
    let order = manager.create_order(customer, payload).await?;
    Ok(Json(AppResponse::success_with_message(
        order,
        "Order placed successfully",
    )))
}

/// Advance an order through the kitchen pipeline (staff side)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let manager = OrderManager::new(state.get_db().clone());
    let order = manager
        .update_order_status(&id, payload.status, &user)
        .await?;
    Ok(Json(AppResponse::success(order)))
}

/// Cancel the customer's own pending order
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let customer = parse_id("user", &user.id)?;
    let manager = OrderManager::new(state.get_db().clone());
    let order = manager.cancel_order(&customer, &id).await?;
    Ok(Json(AppResponse::success_with_message(
        order,
        "Order cancelled",
    )))
}
