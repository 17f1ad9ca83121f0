//! Reservation Repository
//!
//! Conflict checking happens inside a database transaction so two
//! bookings for the same table and window cannot both commit.

use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Reservation, ReservationUpdate};
use crate::utils::time::now_ms;
use shared::ReservationStatus;
use shared::reservation::conflict_window;

pub const TABLE: &str = "reservation";

/// Marker THROWn by the conflict transaction
const CONFLICT_MARKER: &str = "TABLE_CONFLICT";

/// Listing filter + pagination
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    /// Scope to one customer (always set for customer callers)
    pub customer: Option<RecordId>,
    pub status: Option<ReservationStatus>,
    /// Half-open day bounds in unix millis
    pub day_bounds: Option<(i64, i64)>,
    pub page: u32,
    pub limit: u32,
}

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a reservation unless a blocking one already holds the
    /// table in the requested window.
    ///
    /// Check and insert run in one transaction; a conflict aborts it
    /// with a marker the error mapping below picks up. The window is
    /// symmetric around the start and open at both ends, so bookings
    /// that merely touch do not collide.
    pub async fn create_if_no_conflict(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let (window_lo, window_hi) =
            conflict_window(reservation.reservation_date, reservation.duration);
        let table_number = reservation.table_number;

        let outcome = self
            .base
            .db()
            .query(
                r#"BEGIN TRANSACTION;
                LET $clash = (
                    SELECT id FROM reservation
                    WHERE table_number = $table_number
                        AND status IN $blocking
                        AND reservation_date > $window_lo
                        AND reservation_date < $window_hi
                    LIMIT 1
                );
                IF array::len($clash) > 0 {
                    THROW 'TABLE_CONFLICT';
                };
                CREATE reservation CONTENT $data;
                COMMIT TRANSACTION;"#,
            )
            .bind(("table_number", table_number))
            .bind(("blocking", ReservationStatus::BLOCKING.to_vec()))
            .bind(("window_lo", window_lo))
            .bind(("window_hi", window_hi))
            .bind(("data", reservation))
            .await;

        let mut result = match outcome {
            Ok(result) => result,
            Err(e) => return Err(map_conflict(e)),
        };
        if let Some(e) = result.take_errors().into_values().next() {
            return Err(map_conflict(e));
        }

        let created: Vec<Reservation> = result.take(result.num_statements() - 1)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let rid = parse_id(TABLE, id)?;
        let reservation: Option<Reservation> = self.base.db().select(rid).await?;
        Ok(reservation)
    }

    /// Find a reservation only if it belongs to `customer`
    pub async fn find_owned(
        &self,
        id: &str,
        customer: &RecordId,
    ) -> RepoResult<Option<Reservation>> {
        let rid = parse_id(TABLE, id)?;
        {
            let mut dbg_res = self
                .base
                .db()
                .query("SELECT * FROM $thing")
                .bind(("thing", rid.clone()))
                .await?;
            let raw: surrealdb::Value = dbg_res.take(0)?;
            eprintln!("DEBUG find_owned rid={rid:?} customer={customer:?} raw={raw:?}");
        }
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM $thing WHERE customer = $customer")
            .bind(("thing", rid))
            .bind(("customer", customer.clone()))
            .await?;
        let reservations: Vec<Reservation> = result.take(0)?;
        Ok(reservations.into_iter().next())
    }

    /// List reservations ordered by reservation time, with the total
    pub async fn find_paged(
        &self,
        filter: &ReservationFilter,
    ) -> RepoResult<(Vec<Reservation>, u64)> {
        let page = filter.page.max(1);
        let limit = filter.limit.clamp(1, 100);

        let mut conditions: Vec<&str> = Vec::new();
        if filter.customer.is_some() {
            conditions.push("customer = $customer");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.day_bounds.is_some() {
            conditions.push("reservation_date >= $day_start AND reservation_date < $day_end");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        // LIMIT/START are inlined: parameterised limits are unreliable
        // in embedded SurrealDB
        let list_sql = format!(
            "SELECT * FROM {TABLE}{where_clause} ORDER BY reservation_date ASC LIMIT {} START {}",
            limit,
            (page - 1) * limit
        );
        let count_sql = format!("SELECT count() AS count FROM {TABLE}{where_clause} GROUP ALL");

        let (day_start, day_end) = filter.day_bounds.unwrap_or((0, 0));
        let mut result = self
            .base
            .db()
            .query(list_sql)
            .query(count_sql)
            .bind(("customer", filter.customer.clone()))
            .bind(("status", filter.status))
            .bind(("day_start", day_start))
            .bind(("day_end", day_end))
            .await?;

        let reservations: Vec<Reservation> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count.max(0) as u64).unwrap_or(0);
        Ok((reservations, total))
    }

    /// All blocking reservations (pending or confirmed) within the
    /// given day bounds; feeds the availability grid
    pub async fn find_blocking_in_range(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> RepoResult<Vec<Reservation>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT * FROM reservation
                WHERE status IN $blocking
                    AND reservation_date >= $start
                    AND reservation_date < $end"#,
            )
            .bind(("blocking", ReservationStatus::BLOCKING.to_vec()))
            .bind(("start", start_ms))
            .bind(("end", end_ms))
            .await?;
        let reservations: Vec<Reservation> = result.take(0)?;
        Ok(reservations)
    }

    pub async fn update(&self, id: &str, data: ReservationUpdate) -> RepoResult<Reservation> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    reservation_date = IF $has_date THEN $date ELSE reservation_date END,
                    party_size = IF $has_party THEN $party ELSE party_size END,
                    table_number = IF $has_table THEN $table ELSE table_number END,
                    status = IF $has_status THEN $status ELSE status END,
                    special_requests = $special_requests OR special_requests,
                    duration = IF $has_duration THEN $duration ELSE duration END,
                    contact_phone = $contact_phone OR contact_phone,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("has_date", data.reservation_date.is_some()))
            .bind(("date", data.reservation_date))
            .bind(("has_party", data.party_size.is_some()))
            .bind(("party", data.party_size))
            .bind(("has_table", data.table_number.is_some()))
            .bind(("table", data.table_number))
            .bind(("has_status", data.status.is_some()))
            .bind(("status", data.status))
            .bind(("special_requests", data.special_requests))
            .bind(("has_duration", data.duration.is_some()))
            .bind(("duration", data.duration))
            .bind(("contact_phone", data.contact_phone))
            .bind(("now", now_ms()))
            .await?;

        result
            .take::<Option<Reservation>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Cancel unless already completed; `None` means the completed
    /// guard rejected the write
    pub async fn conditional_cancel(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET status = 'cancelled', updated_at = $now
                WHERE status != 'completed'
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("now", now_ms()))
            .await?;

        let updated: Vec<Reservation> = result.take(0)?;
        Ok(updated.into_iter().next())
    }
}

fn map_conflict(e: surrealdb::Error) -> RepoError {
    let msg = e.to_string();
    if msg.contains(CONFLICT_MARKER) {
        RepoError::Duplicate("Table is already reserved for this time slot".to_string())
    } else {
        RepoError::Database(msg)
    }
}
