//! Inventory Item Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Stock category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InventoryCategory {
    Vegetables,
    Meat,
    Dairy,
    Spices,
    Beverages,
    Grains,
    Others,
}

/// Measurement unit for stock levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockUnit {
    Kg,
    G,
    L,
    Ml,
    Pieces,
}

/// Supplier contact
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Supplier {
    pub name: Option<String>,
    pub contact: Option<String>,
}

/// Inventory item entity
///
/// `is_low_stock` is derived, recomputed on every write that touches
/// `current_stock` or `min_stock_level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub category: InventoryCategory,
    pub current_stock: f64,
    pub unit: StockUnit,
    pub min_stock_level: f64,
    pub cost_per_unit: f64,
    pub supplier: Option<Supplier>,
    pub last_restocked: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_low_stock: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for creating an inventory item
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub category: InventoryCategory,
    pub current_stock: f64,
    pub unit: StockUnit,
    pub min_stock_level: f64,
    pub cost_per_unit: f64,
    pub supplier: Option<Supplier>,
}

/// Partial update payload for an inventory item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub category: Option<InventoryCategory>,
    pub current_stock: Option<f64>,
    pub unit: Option<StockUnit>,
    pub min_stock_level: Option<f64>,
    pub cost_per_unit: Option<f64>,
    pub supplier: Option<Supplier>,
}

/// Payload for a restock delta
#[derive(Debug, Clone, Deserialize)]
pub struct RestockRequest {
    pub quantity: f64,
}
