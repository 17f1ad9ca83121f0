//! Inventory Repository
//!
//! `is_low_stock` is recomputed on every write that can move the stock
//! level relative to the threshold.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{InventoryCategory, InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use crate::utils::time::now_ms;

pub const TABLE: &str = "inventory_item";

/// Listing filter + pagination
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub category: Option<InventoryCategory>,
    pub low_stock_only: bool,
    pub page: u32,
    pub limit: u32,
}

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_paged(
        &self,
        filter: &InventoryFilter,
    ) -> RepoResult<(Vec<InventoryItem>, u64)> {
        let page = filter.page.max(1);
        let limit = filter.limit.clamp(1, 100);

        let mut conditions: Vec<&str> = Vec::new();
        if filter.category.is_some() {
            conditions.push("category = $category");
        }
        if filter.low_stock_only {
            conditions.push("is_low_stock = true");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        // LIMIT/START are inlined: parameterised limits are unreliable
        // in embedded SurrealDB
        let list_sql = format!(
            "SELECT * FROM {TABLE}{where_clause} ORDER BY is_low_stock DESC, name ASC LIMIT {} START {}",
            limit,
            (page - 1) * limit
        );
        let count_sql = format!("SELECT count() AS count FROM {TABLE}{where_clause} GROUP ALL");

        let mut result = self
            .base
            .db()
            .query(list_sql)
            .query(count_sql)
            .bind(("category", filter.category))
            .await?;

        let items: Vec<InventoryItem> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count.max(0) as u64).unwrap_or(0);
        Ok((items, total))
    }

    /// Everything at or below its threshold
    pub async fn find_low_stock(&self) -> RepoResult<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = self
            .base
            .db()
            .query("SELECT * FROM inventory_item WHERE is_low_stock = true ORDER BY name ASC")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<InventoryItem>> {
        let rid = parse_id(TABLE, id)?;
        let item: Option<InventoryItem> = self.base.db().select(rid).await?;
        Ok(item)
    }

    pub async fn create(&self, data: InventoryItemCreate) -> RepoResult<InventoryItem> {
        let now = now_ms();
        let item = InventoryItem {
            id: None,
            name: data.name,
            category: data.category,
            current_stock: data.current_stock,
            unit: data.unit,
            min_stock_level: data.min_stock_level,
            cost_per_unit: data.cost_per_unit,
            supplier: data.supplier,
            last_restocked: None,
            is_low_stock: data.current_stock <= data.min_stock_level,
            created_at: now,
            updated_at: now,
        };

        let created: Option<InventoryItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory item".to_string()))
    }

    pub async fn update(&self, id: &str, data: InventoryItemUpdate) -> RepoResult<InventoryItem> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    category = IF $has_category THEN $category ELSE category END,
                    current_stock = IF $has_stock THEN $stock ELSE current_stock END,
                    unit = IF $has_unit THEN $unit ELSE unit END,
                    min_stock_level = IF $has_min THEN $min ELSE min_stock_level END,
                    cost_per_unit = IF $has_cost THEN $cost ELSE cost_per_unit END,
                    supplier = IF $has_supplier THEN $supplier ELSE supplier END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", rid.clone()))
            .bind(("name", data.name))
            .bind(("has_category", data.category.is_some()))
            .bind(("category", data.category))
            .bind(("has_stock", data.current_stock.is_some()))
            .bind(("stock", data.current_stock))
            .bind(("has_unit", data.unit.is_some()))
            .bind(("unit", data.unit))
            .bind(("has_min", data.min_stock_level.is_some()))
            .bind(("min", data.min_stock_level))
            .bind(("has_cost", data.cost_per_unit.is_some()))
            .bind(("cost", data.cost_per_unit))
            .bind(("has_supplier", data.supplier.is_some()))
            .bind(("supplier", data.supplier))
            .bind(("now", now_ms()))
            .await?;

        let updated = result
            .take::<Option<InventoryItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))?;

        self.refresh_low_stock(&rid.to_string(), &updated).await
    }

    /// Add a restock delta and stamp `last_restocked`
    pub async fn restock(&self, id: &str, quantity: f64) -> RepoResult<InventoryItem> {
        if quantity <= 0.0 {
            return Err(RepoError::Validation(
                "Restock quantity must be positive".to_string(),
            ));
        }

        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    current_stock = current_stock + $quantity,
                    last_restocked = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", rid.clone()))
            .bind(("quantity", quantity))
            .bind(("now", now_ms()))
            .await?;

        let updated = result
            .take::<Option<InventoryItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))?;

        self.refresh_low_stock(&rid.to_string(), &updated).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(TABLE, id)?;
        let existing: Option<InventoryItem> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!(
                "Inventory item {} not found",
                id
            )));
        }
        let _: Option<InventoryItem> = self.base.db().delete(rid).await?;
        Ok(true)
    }

    async fn refresh_low_stock(
        &self,
        id: &str,
        current: &InventoryItem,
    ) -> RepoResult<InventoryItem> {
        let is_low = current.current_stock <= current.min_stock_level;
        if is_low == current.is_low_stock {
            return Ok(current.clone());
        }

        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_low_stock = $is_low RETURN AFTER")
            .bind(("thing", rid))
            .bind(("is_low", is_low))
            .await?;

        result
            .take::<Option<InventoryItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))
    }
}
