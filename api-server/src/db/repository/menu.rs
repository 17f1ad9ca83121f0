//! Menu Repository

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::menu_item::DEFAULT_IMAGE;
use crate::db::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::utils::time::now_ms;

pub const TABLE: &str = "menu_item";

/// Listing filter + pagination
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub category: Option<MenuCategory>,
    pub available_only: bool,
    pub page: u32,
    pub limit: u32,
}

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List menu items, newest first, with the matching total
    pub async fn find_paged(&self, filter: &MenuFilter) -> RepoResult<(Vec<MenuItem>, u64)> {
        let page = filter.page.max(1);
        let limit = filter.limit.clamp(1, 100);

        let mut conditions: Vec<&str> = Vec::new();
        if filter.category.is_some() {
            conditions.push("category = $category");
        }
        if filter.available_only {
            conditions.push("is_available = true");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        // LIMIT/START are inlined: parameterised limits are unreliable
        // in embedded SurrealDB
        let list_sql = format!(
            "SELECT * FROM {TABLE}{where_clause} ORDER BY created_at DESC LIMIT {} START {}",
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

        let items: Vec<MenuItem> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count.max(0) as u64).unwrap_or(0);
        Ok((items, total))
    }

    /// Distinct categories with at least one item
    pub async fn distinct_categories(&self) -> RepoResult<Vec<MenuCategory>> {
        #[derive(Deserialize)]
        struct CategoryRow {
            category: MenuCategory,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT category FROM menu_item GROUP BY category")
            .await?;
        let rows: Vec<CategoryRow> = result.take(0)?;
        Ok(rows.into_iter().map(|r| r.category).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let rid = parse_id(TABLE, id)?;
        let item: Option<MenuItem> = self.base.db().select(rid).await?;
        Ok(item)
    }

    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let now = now_ms();
        let item = MenuItem {
            id: None,
            name: data.name,
            category: data.category,
            description: data.description,
            price: data.price,
            image: data.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            ingredients: data.ingredients,
            preparation_time: data.preparation_time,
            is_available: data.is_available.unwrap_or(true),
            nutritional_info: data.nutritional_info,
            created_at: now,
            updated_at: now,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    category = IF $has_category THEN $category ELSE category END,
                    description = $description OR description,
                    price = IF $has_price THEN $price ELSE price END,
                    image = $image OR image,
                    ingredients = IF $has_ingredients THEN $ingredients ELSE ingredients END,
                    preparation_time = IF $has_prep THEN $prep ELSE preparation_time END,
                    is_available = IF $has_available THEN $available ELSE is_available END,
                    nutritional_info = IF $has_nutrition THEN $nutrition ELSE nutritional_info END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("name", data.name))
            .bind(("has_category", data.category.is_some()))
            .bind(("category", data.category))
            .bind(("description", data.description))
            .bind(("has_price", data.price.is_some()))
            .bind(("price", data.price))
            .bind(("image", data.image))
            .bind(("has_ingredients", data.ingredients.is_some()))
            .bind(("ingredients", data.ingredients))
            .bind(("has_prep", data.preparation_time.is_some()))
            .bind(("prep", data.preparation_time))
            .bind(("has_available", data.is_available.is_some()))
            .bind(("available", data.is_available))
            .bind(("has_nutrition", data.nutritional_info.is_some()))
            .bind(("nutrition", data.nutritional_info))
            .bind(("now", now_ms()))
            .await?;

        result
            .take::<Option<MenuItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(TABLE, id)?;
        let existing: Option<MenuItem> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
        }
        let _: Option<MenuItem> = self.base.db().delete(rid).await?;
        Ok(true)
    }
}
