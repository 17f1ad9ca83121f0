//! Feedback API Handlers
//!
//! Feedback is moderated: submissions start unapproved (admin authors
//! excepted) and only approved entries show on the public listing.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{Feedback, FeedbackCreate, FeedbackUpdate};
use crate::db::repository::feedback::{FeedbackFilter, RatingAverages};
use crate::db::repository::{FeedbackRepository, OrderRepository, parse_id};
use crate::utils::time::now_ms;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_range};
use crate::utils::{AppError, AppResult};
use shared::{AppResponse, Pagination};

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct FeedbackListQuery {
    #[serde(rename = "minRating")]
    pub min_rating: Option<i64>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Approved feedback plus the rating averages
#[derive(Debug, Serialize)]
pub struct FeedbackListing {
    pub feedback: Vec<Feedback>,
    pub averages: RatingAverages,
    pub pagination: Pagination,
}

/// Approved feedback with averages (public)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<FeedbackListQuery>,
) -> AppResult<Json<AppResponse<FeedbackListing>>> {
    let filter = FeedbackFilter {
        approved_only: true,
        min_rating: query.min_rating,
        page: query.page,
        limit: query.limit,
    };

    let repo = FeedbackRepository::new(state.get_db().clone());
    let (feedback, total) = repo.find_paged(&filter).await?;
    let averages = repo.rating_averages().await?;

    Ok(Json(AppResponse::success(FeedbackListing {
        feedback,
        averages,
        pagination: Pagination::new(filter.page.max(1), total, filter.limit.clamp(1, 100)),
    })))
}

/// All feedback, approved or not (admin)
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<FeedbackListQuery>,
) -> AppResult<Json<AppResponse<FeedbackListing>>> {
    let filter = FeedbackFilter {
        approved_only: false,
        min_rating: query.min_rating,
        page: query.page,
        limit: query.limit,
    };

    let repo = FeedbackRepository::new(state.get_db().clone());
    let (feedback, total) = repo.find_paged(&filter).await?;
    let averages = repo.rating_averages().await?;

    Ok(Json(AppResponse::success(FeedbackListing {
        feedback,
        averages,
        pagination: Pagination::new(filter.page.max(1), total, filter.limit.clamp(1, 100)),
    })))
}

/// The caller's feedback for one of their orders
pub async fn get_for_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<Feedback>>> {
    let customer = parse_id("user", &user.id)?;
    let orders = OrderRepository::new(state.get_db().clone());
    let order = orders
        .find_owned(&order_id, &customer)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;
    let order_rid = order
        .id
        .ok_or_else(|| AppError::internal("Order record without id"))?;

    let repo = FeedbackRepository::new(state.get_db().clone());
    let feedback = repo
        .find_for_order(&order_rid, &customer)
        .await?
        .ok_or_else(|| AppError::not_found("No feedback for this order"))?;
    Ok(Json(AppResponse::success(feedback)))
}

/// Fetch one feedback entry (public)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Feedback>>> {
    let repo = FeedbackRepository::new(state.get_db().clone());
    let feedback = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Feedback {} not found", id)))?;
    Ok(Json(AppResponse::success(feedback)))
}

/// Submit feedback for one of the caller's own orders
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<FeedbackCreate>,
) -> AppResult<Json<AppResponse<Feedback>>> {
    validate_range(payload.rating, "rating", 1, 5)?;
    for (value, field) in [
        (payload.food_quality, "food_quality"),
        (payload.service, "service"),
        (payload.ambiance, "ambiance"),
    ] {
        if let Some(value) = value {
            validate_range(value, field, 1, 5)?;
        }
    }
    validate_optional_text(&payload.comment, "comment", MAX_NOTE_LEN)?;

    // Feedback is only accepted for the caller's own order
    let customer = parse_id("user", &user.id)?;
    let orders = OrderRepository::new(state.get_db().clone());
    let order = orders
        .find_owned(&payload.order_id, &customer)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;
    let order_rid = order
        .id
        .ok_or_else(|| AppError::internal("Order record without id"))?;

    let now = now_ms();
    let repo = FeedbackRepository::new(state.get_db().clone());
    let feedback = repo
        .create(Feedback {
            id: None,
            customer,
            order_id: order_rid,
            rating: payload.rating,
            comment: payload.comment,
            food_quality: payload.food_quality,
            service: payload.service,
            ambiance: payload.ambiance,
            // Admin submissions skip moderation
            is_approved: user.role == Role::Admin,
            created_at: now,
            updated_at: now,
        })
        .await?;
    tracing::info!(rating = feedback.rating, "Feedback submitted");
    Ok(Json(AppResponse::success_with_message(
        feedback,
        "Feedback submitted successfully",
    )))
}

/// Moderate or edit feedback (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FeedbackUpdate>,
) -> AppResult<Json<AppResponse<Feedback>>> {
    if let Some(rating) = payload.rating {
        validate_range(rating, "rating", 1, 5)?;
    }
    validate_optional_text(&payload.comment, "comment", MAX_NOTE_LEN)?;

    let repo = FeedbackRepository::new(state.get_db().clone());
    let feedback = repo.update(&id, payload).await?;
    Ok(Json(AppResponse::success(feedback)))
}

/// Remove feedback (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = FeedbackRepository::new(state.get_db().clone());
    repo.delete(&id).await?;
    tracing::info!(id = %id, "Feedback deleted");
    Ok(Json(AppResponse::success_with_message(
        (),
        "Feedback deleted",
    )))
}
