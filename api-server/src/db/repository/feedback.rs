//! Feedback Repository

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Feedback, FeedbackUpdate};
use crate::utils::time::now_ms;

pub const TABLE: &str = "feedback";

/// Listing filter + pagination
#[derive(Debug, Clone, Default)]
pub struct FeedbackFilter {
    pub approved_only: bool,
    pub min_rating: Option<i64>,
    pub page: u32,
    pub limit: u32,
}

/// Averages across approved feedback
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatingAverages {
    pub avg_rating: f64,
    pub avg_food_quality: f64,
    pub avg_service: f64,
    pub avg_ambiance: f64,
    pub total_reviews: i64,
}

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert feedback; the unique order index enforces one entry per
    /// order even under concurrent submissions
    pub async fn create(&self, feedback: Feedback) -> RepoResult<Feedback> {
        let created: Result<Option<Feedback>, surrealdb::Error> =
            self.base.db().create(TABLE).content(feedback).await;

        match created {
            Ok(Some(feedback)) => Ok(feedback),
            Ok(None) => Err(RepoError::Database("Failed to create feedback".to_string())),
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("idx_feedback_order") {
                    Err(RepoError::Duplicate(
                        "Feedback already submitted for this order".to_string(),
                    ))
                } else {
                    Err(RepoError::Database(msg))
                }
            }
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Feedback>> {
        let rid = parse_id(TABLE, id)?;
        let feedback: Option<Feedback> = self.base.db().select(rid).await?;
        Ok(feedback)
    }

    /// The customer's feedback for one of their orders
    pub async fn find_for_order(
        &self,
        order_id: &RecordId,
        customer: &RecordId,
    ) -> RepoResult<Option<Feedback>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM feedback WHERE order_id = $order_id AND customer = $customer LIMIT 1",
            )
            .bind(("order_id", order_id.clone()))
            .bind(("customer", customer.clone()))
            .await?;
        let feedback: Vec<Feedback> = result.take(0)?;
        Ok(feedback.into_iter().next())
    }

    /// List feedback, newest first, with the matching total
    pub async fn find_paged(&self, filter: &FeedbackFilter) -> RepoResult<(Vec<Feedback>, u64)> {
        let page = filter.page.max(1);
        let limit = filter.limit.clamp(1, 100);

        let mut conditions: Vec<&str> = Vec::new();
        if filter.approved_only {
            conditions.push("is_approved = true");
        }
        if filter.min_rating.is_some() {
            conditions.push("rating >= $min_rating");
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
            .bind(("min_rating", filter.min_rating))
            .await?;

        let feedback: Vec<Feedback> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count.max(0) as u64).unwrap_or(0);
        Ok((feedback, total))
    }

    /// Rating averages over approved feedback
    pub async fn rating_averages(&self) -> RepoResult<RatingAverages> {
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT
                    math::mean(rating) AS avgRating,
                    math::mean(food_quality) AS avgFoodQuality,
                    math::mean(service) AS avgService,
                    math::mean(ambiance) AS avgAmbiance,
                    count() AS totalReviews
                FROM feedback
                WHERE is_approved = true
                GROUP ALL"#,
            )
            .await?;

        let rows: Vec<RatingAverages> = result.take(0)?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    pub async fn update(&self, id: &str, data: FeedbackUpdate) -> RepoResult<Feedback> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    rating = IF $has_rating THEN $rating ELSE rating END,
                    comment = $comment OR comment,
                    food_quality = IF $has_food THEN $food ELSE food_quality END,
                    service = IF $has_service THEN $service ELSE service END,
                    ambiance = IF $has_ambiance THEN $ambiance ELSE ambiance END,
                    is_approved = IF $has_approved THEN $approved ELSE is_approved END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("has_rating", data.rating.is_some()))
            .bind(("rating", data.rating))
            .bind(("comment", data.comment))
            .bind(("has_food", data.food_quality.is_some()))
            .bind(("food", data.food_quality))
            .bind(("has_service", data.service.is_some()))
            .bind(("service", data.service))
            .bind(("has_ambiance", data.ambiance.is_some()))
            .bind(("ambiance", data.ambiance))
            .bind(("has_approved", data.is_approved.is_some()))
            .bind(("approved", data.is_approved))
            .bind(("now", now_ms()))
            .await?;

        result
            .take::<Option<Feedback>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Feedback {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(TABLE, id)?;
        let existing: Option<Feedback> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Feedback {} not found", id)));
        }
        let _: Option<Feedback> = self.base.db().delete(rid).await?;
        Ok(true)
    }
}
