//! Feedback Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Customer feedback entity, one per order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    /// 1..=5
    pub rating: i64,
    pub comment: Option<String>,
    pub food_quality: Option<i64>,
    pub service: Option<i64>,
    pub ambiance: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_approved: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for submitting feedback
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackCreate {
    pub order_id: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub food_quality: Option<i64>,
    pub service: Option<i64>,
    pub ambiance: Option<i64>,
}

/// Moderation / edit payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackUpdate {
    pub rating: Option<i64>,
    pub comment: Option<String>,
    pub food_quality: Option<i64>,
    pub service: Option<i64>,
    pub ambiance: Option<i64>,
    pub is_approved: Option<bool>,
}
