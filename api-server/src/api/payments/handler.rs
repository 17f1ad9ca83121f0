//! Payments API Handlers
//!
//! Payments are mock-processed against the stored order; no gateway is
//! involved. The history endpoint pairs the paged orders with a
//! per-status aggregate.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{Order, OrderItem, PaymentReceipt, PaymentRequest, RefundReceipt};
use crate::db::repository::order::{OrderFilter, PaymentSummaryRow};
use crate::db::repository::parse_id;
use crate::orders::{OrderError, OrderManager};
use crate::utils::AppResult;
use shared::{AppResponse, OrderStatus, Pagination, PaymentMethod, PaymentStatus};

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "paymentStatus")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Payment history: the customer's orders plus totals per payment status
#[derive(Debug, Serialize)]
pub struct PaymentHistory {
    pub orders: Vec<Order>,
    pub summary: Vec<PaymentSummaryRow>,
    pub pagination: Pagination,
}

/// Payment-facing view of one order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub order_id: String,
    pub order_number: String,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub order_status: OrderStatus,
    pub items: Vec<OrderItem>,
}

/// The customer's payment history
pub async fn history(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<AppResponse<PaymentHistory>>> {
    let customer = parse_id("user", &user.id)?;
    let filter = OrderFilter {
        customer: Some(customer.clone()),
        status: None,
        order_type: None,
        payment_status: query.payment_status,
        page: query.page,
        limit: query.limit,
    };

    let manager = OrderManager::new(state.get_db().clone());
    let (orders, total) = manager.list_orders(&filter).await?;
    let summary = manager.payment_summary(&customer).await?;

    Ok(Json(AppResponse::success(PaymentHistory {
        orders,
        summary,
        pagination: Pagination::new(filter.page.max(1), total, filter.limit.clamp(1, 100)),
    })))
}

/// Payment details for one order
pub async fn get_details(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<PaymentDetails>>> {
    let manager = OrderManager::new(state.get_db().clone());
    let order = if user.role == Role::Customer {
        let customer = parse_id("user", &user.id)?;
        manager.repository().find_owned(&order_id, &customer).await?
    } else {
        manager.repository().find_by_id(&order_id).await?
    };
    let order = order.ok_or(OrderError::NotFound)?;

    Ok(Json(AppResponse::success(PaymentDetails {
        order_id: order
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| order_id.clone()),
        order_number: order.order_number,
        total_amount: order.total_amount,
        payment_status: order.payment_status,
        payment_method: order.payment_method,
        order_status: order.status,
        items: order.items,
    })))
}

/// Process a payment for the customer's own order
pub async fn process(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<AppResponse<PaymentReceipt>>> {
    let customer = parse_id("user", &user.id)?;
    let manager = OrderManager::new(state.get_db().clone());
    let receipt = manager.process_payment(&customer, payload).await?;
    Ok(Json(AppResponse::success_with_message(
        receipt,
        "Payment processed successfully",
    )))
}

/// Refund a paid order (admin)
pub async fn refund(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<RefundReceipt>>> {
    let manager = OrderManager::new(state.get_db().clone());
    let receipt = manager.refund_payment(&order_id).await?;
    Ok(Json(AppResponse::success_with_message(
        receipt,
        "Refund processed successfully",
    )))
}
