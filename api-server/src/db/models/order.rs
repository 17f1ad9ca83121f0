//! Order Model
//!
//! Orders embed their line items; menu prices are captured at order
//! time so later menu edits do not change historical totals.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::{OrderStatus, OrderType, PaymentMethod, PaymentStatus};

/// Embedded order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    /// Name snapshot at order time
    pub name: String,
    pub quantity: i64,
    /// Unit price snapshot at order time
    pub price: f64,
}

/// Delivery address
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub order_number: String,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub delivery_address: Option<Address>,
    pub table_number: Option<i64>,
    pub special_instructions: Option<String>,
    /// Minutes, derived from the slowest line at creation
    pub estimated_preparation_time: Option<i64>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub assigned_chef: Option<RecordId>,
    pub transaction_id: Option<String>,
    pub refund_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Incoming order line (price is looked up, never trusted)
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub menu_item: String,
    pub quantity: i64,
}

/// Payload for placing an order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<OrderItemInput>,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub delivery_address: Option<Address>,
    pub table_number: Option<i64>,
    pub special_instructions: Option<String>,
}

/// Mock card details for payment processing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentDetails {
    pub card_number: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
}

/// Payload for processing a payment
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub order_id: String,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<PaymentDetails>,
}

/// Successful payment result
#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub order: Order,
    pub transaction_id: String,
    pub payment_status: PaymentStatus,
    pub paid_amount: f64,
}

/// Successful refund result
#[derive(Debug, Clone, Serialize)]
pub struct RefundReceipt {
    pub order_id: String,
    pub refund_amount: f64,
    pub refund_status: &'static str,
    pub transaction_id: String,
}
