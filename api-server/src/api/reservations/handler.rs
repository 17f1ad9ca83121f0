//! Reservations API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationCreate, ReservationUpdate};
use crate::db::repository::parse_id;
use crate::db::repository::reservation::ReservationFilter;
use crate::reservations::ReservationEngine;
use crate::utils::AppResult;
use crate::utils::time::{day_bounds_ms, parse_date};
use shared::reservation::TimeSlot;
use shared::{AppResponse, ListResponse, ReservationStatus};

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct ReservationListQuery {
    pub status: Option<ReservationStatus>,
    /// YYYY-MM-DD, limits the listing to that day
    pub date: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// YYYY-MM-DD
    pub date: String,
    #[serde(rename = "partySize", default = "default_party_size")]
    pub party_size: u32,
}

fn default_party_size() -> u32 {
    2
}

/// List reservations. Customers only ever see their own.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ReservationListQuery>,
) -> AppResult<Json<ListResponse<Reservation>>> {
    let customer = if user.role == Role::Customer {
        Some(parse_id("user", &user.id)?)
    } else {
        None
    };
    let day_bounds = match &query.date {
        Some(raw) => Some(day_bounds_ms(parse_date(raw)?)),
        None => None,
    };
    let filter = ReservationFilter {
        customer,
        status: query.status,
        day_bounds,
        page: query.page,
        limit: query.limit,
    };

    let engine = ReservationEngine::new(state.get_db().clone());
    let (reservations, total) = engine.list(&filter).await?;
    Ok(Json(ListResponse::new(
        reservations,
        total,
        filter.page.max(1),
        filter.limit.clamp(1, 100),
    )))
}

/// The 30-minute availability grid for one day (public)
pub async fn available_slots(
    State(state): State<ServerState>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<AppResponse<Vec<TimeSlot>>>> {
    let day = parse_date(&query.date)?;
    let engine = ReservationEngine::new(state.get_db().clone());
    let slots = engine.available_slots(day, query.party_size).await?;
    Ok(Json(AppResponse::success(slots)))
}

/// Fetch one reservation, scoped to the owner for customers
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let engine = ReservationEngine::new(state.get_db().clone());
    let scope = if user.role == Role::Customer {
        Some(parse_id("user", &user.id)?)
    } else {
        None
    };
    let reservation = engine.get(&id, scope.as_ref()).await?;
    Ok(Json(AppResponse::success(reservation)))
}

/// Book a table
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let customer = parse_id("user", &user.id)?;
    let engine = ReservationEngine::new(state.get_db().clone());
    let reservation = engine.create(customer, payload).await?;
    Ok(Json(AppResponse::success_with_message(
        reservation,
        "Reservation created successfully",
    )))
}

/// Front-of-house edit (staff / admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let engine = ReservationEngine::new(state.get_db().clone());
    let reservation = engine.update(&id, payload).await?;
    Ok(Json(AppResponse::success(reservation)))
}

/// Cancel the customer's own reservation
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let customer = parse_id("user", &user.id)?;
    let engine = ReservationEngine::new(state.get_db().clone());
    let reservation = engine.cancel(&customer, &id).await?;
    Ok(Json(AppResponse::success_with_message(
        reservation,
        "Reservation cancelled",
    )))
}
