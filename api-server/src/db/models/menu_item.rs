//! Menu Item Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Menu category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MenuCategory {
    Starters,
    MainCourse,
    Desserts,
    Drinks,
    Sides,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starters => "starters",
            Self::MainCourse => "main-course",
            Self::Desserts => "desserts",
            Self::Drinks => "drinks",
            Self::Sides => "sides",
        }
    }
}

/// Recipe ingredient line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Option<String>,
}

/// Per-serving nutrition facts
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NutritionalInfo {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub category: MenuCategory,
    pub description: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Minutes
    pub preparation_time: i64,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_available: bool,
    pub nutritional_info: Option<NutritionalInfo>,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

pub const DEFAULT_IMAGE: &str = "default-food.jpg";

/// Payload for creating a menu item
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub category: MenuCategory,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    pub preparation_time: i64,
    pub is_available: Option<bool>,
    pub nutritional_info: Option<NutritionalInfo>,
}

/// Partial update payload for a menu item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<MenuCategory>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub preparation_time: Option<i64>,
    pub is_available: Option<bool>,
    pub nutritional_info: Option<NutritionalInfo>,
}
