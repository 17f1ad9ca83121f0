//! Reservation Engine
//!
//! Booking rules live here; the repository supplies the transactional
//! conflict check and the day queries.

use chrono::NaiveDate;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::ReservationError;
use crate::db::models::{Reservation, ReservationCreate, ReservationUpdate};
use crate::db::repository::reservation::ReservationFilter;
use crate::db::repository::{RepoError, ReservationRepository};
use crate::utils::time::day_bounds_ms;
use shared::ReservationStatus;
use shared::reservation::{TOTAL_TABLES, TimeSlot, compute_time_slots, tables_needed};

/// Largest bookable party
const MAX_PARTY_SIZE: i64 = 20;

#[derive(Clone)]
pub struct ReservationEngine {
    reservations: ReservationRepository,
}

impl ReservationEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            reservations: ReservationRepository::new(db),
        }
    }

    pub fn repository(&self) -> &ReservationRepository {
        &self.reservations
    }

    /// Book a table.
    ///
    /// The table must be free of pending/confirmed reservations within
    /// one duration either side of the requested start; the check and
    /// the insert are one transaction, so racing requests for the same
    /// window cannot both succeed.
    pub async fn create(
        &self,
        customer: RecordId,
        payload: ReservationCreate,
    ) -> Result<Reservation, ReservationError> {
        validate_booking(&payload)?;

        let now = crate::utils::time::now_ms();
        let reservation = Reservation {
            id: None,
            customer,
            reservation_date: payload.reservation_date,
            party_size: payload.party_size,
            table_number: payload.table_number,
            status: ReservationStatus::Pending,
            special_requests: payload.special_requests.clone(),
            duration: payload.duration_or_default(),
            contact_phone: payload.contact_phone.clone(),
            created_at: now,
            updated_at: now,
        };

        match self.reservations.create_if_no_conflict(reservation).await {
            Ok(created) => {
                tracing::info!(
                    table = created.table_number,
                    start = created.reservation_date,
                    "Reservation created"
                );
                Ok(created)
            }
            Err(RepoError::Duplicate(_)) => Err(ReservationError::TableConflict),
            Err(e) => Err(e.into()),
        }
    }

    /// The 30-minute availability grid for one day.
    ///
    /// Counts pending/confirmed reservations for the day against the
    /// floor's aggregate capacity; this is a capacity heuristic, not a
    /// per-table allocator, so it can disagree with the per-table
    /// conflict check in edge cases.
    pub async fn available_slots(
        &self,
        day: NaiveDate,
        party_size: u32,
    ) -> Result<Vec<TimeSlot>, ReservationError> {
        if party_size == 0 {
            return Err(ReservationError::InvalidOperation(
                "Party size must be at least 1".to_string(),
            ));
        }
        if tables_needed(party_size) > TOTAL_TABLES {
            return Err(ReservationError::InvalidOperation(format!(
                "Party of {} exceeds restaurant capacity",
                party_size
            )));
        }

        let (start_ms, end_ms) = day_bounds_ms(day);
        let blocking = self
            .reservations
            .find_blocking_in_range(start_ms, end_ms)
            .await?;
        let windows: Vec<_> = blocking.iter().map(|r| r.window()).collect();

        Ok(compute_time_slots(day, party_size, &windows))
    }

    pub async fn list(
        &self,
        filter: &ReservationFilter,
    ) -> Result<(Vec<Reservation>, u64), ReservationError> {
        Ok(self.reservations.find_paged(filter).await?)
    }

    /// Fetch one reservation; customers only see their own
    pub async fn get(
        &self,
        id: &str,
        customer_scope: Option<&RecordId>,
    ) -> Result<Reservation, ReservationError> {
        let found = match customer_scope {
            Some(customer) => self.reservations.find_owned(id, customer).await?,
            None => self.reservations.find_by_id(id).await?,
        };
        found.ok_or(ReservationError::NotFound)
    }

    /// Staff-side edit (status, table, time, details)
    pub async fn update(
        &self,
        id: &str,
        data: ReservationUpdate,
    ) -> Result<Reservation, ReservationError> {
        if let Some(party) = data.party_size {
            if party < 1 || party > MAX_PARTY_SIZE {
                return Err(ReservationError::InvalidOperation(format!(
                    "Party size must be between 1 and {}",
                    MAX_PARTY_SIZE
                )));
            }
        }
        if let Some(table) = data.table_number {
            validate_table_number(table)?;
        }

        match self.reservations.update(id, data).await {
            Ok(updated) => Ok(updated),
            Err(RepoError::NotFound(_)) => Err(ReservationError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Customer cancellation; completed reservations stay completed
    pub async fn cancel(
        &self,
        customer: &RecordId,
        id: &str,
    ) -> Result<Reservation, ReservationError> {
        let reservation = self
            .reservations
            .find_owned(id, customer)
            .await?
            .ok_or(ReservationError::NotFound)?;

        if reservation.status == ReservationStatus::Completed {
            return Err(ReservationError::AlreadyCompleted);
        }

        match self.reservations.conditional_cancel(id).await? {
            Some(cancelled) => {
                tracing::info!(table = cancelled.table_number, "Reservation cancelled");
                Ok(cancelled)
            }
            None => Err(ReservationError::AlreadyCompleted),
        }
    }
}

fn validate_booking(payload: &ReservationCreate) -> Result<(), ReservationError> {
    if payload.party_size < 1 || payload.party_size > MAX_PARTY_SIZE {
        return Err(ReservationError::InvalidOperation(format!(
            "Party size must be between 1 and {}",
            MAX_PARTY_SIZE
        )));
    }
    validate_table_number(payload.table_number)?;
    if payload.contact_phone.trim().is_empty() {
        return Err(ReservationError::InvalidOperation(
            "Contact phone is required".to_string(),
        ));
    }
    if let Some(duration) = payload.duration {
        if duration < 15 || duration > 12 * 60 {
            return Err(ReservationError::InvalidOperation(
                "Duration must be between 15 minutes and 12 hours".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_table_number(table: i64) -> Result<(), ReservationError> {
    if table < 1 || table > TOTAL_TABLES as i64 {
        return Err(ReservationError::InvalidOperation(format!(
            "Table number must be between 1 and {}",
            TOTAL_TABLES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn setup() -> (ReservationEngine, RecordId) {
        let db = DbService::memory().await.unwrap();
        let engine = ReservationEngine::new(db.db.clone());
        let customer = RecordId::from_table_key("user", "alice");
        (engine, customer)
    }

    fn at(hour: u32, min: u32) -> i64 {
        NaiveDate::from_ymd_opt(2025, 6, 14)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn booking(start_ms: i64, table: i64) -> ReservationCreate {
        ReservationCreate {
            reservation_date: start_ms,
            party_size: 4,
            table_number: table,
            special_requests: None,
            duration: None,
            contact_phone: "+34 600 000 000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let (engine, customer) = setup().await;
        let created = engine
            .create(customer, booking(at(18, 0), 5))
            .await
            .unwrap();

        assert_eq!(created.status, ReservationStatus::Pending);
        assert_eq!(created.duration, 90);
        assert_eq!(created.table_number, 5);
    }

    #[tokio::test]
    async fn test_same_table_overlap_conflicts() {
        let (engine, customer) = setup().await;
        engine
            .create(customer.clone(), booking(at(18, 0), 5))
            .await
            .unwrap();

        // One hour later on the same table falls inside the window
        let err = engine
            .create(customer, booking(at(19, 0), 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::TableConflict));
    }

    #[tokio::test]
    async fn test_other_table_is_free() {
        let (engine, customer) = setup().await;
        engine
            .create(customer.clone(), booking(at(18, 0), 5))
            .await
            .unwrap();
        engine
            .create(customer, booking(at(18, 0), 6))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_back_to_back_bookings_allowed() {
        let (engine, customer) = setup().await;
        engine
            .create(customer.clone(), booking(at(18, 0), 5))
            .await
            .unwrap();

        // Exactly one duration later: boundary touch, not a conflict
        engine
            .create(customer.clone(), booking(at(19, 30), 5))
            .await
            .unwrap();
        // And one duration earlier
        engine
            .create(customer, booking(at(16, 30), 5))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_reservation_frees_the_table() {
        let (engine, customer) = setup().await;
        let first = engine
            .create(customer.clone(), booking(at(18, 0), 5))
            .await
            .unwrap();
        engine
            .cancel(&customer, &first.id.unwrap().to_string())
            .await
            .unwrap();

        engine
            .create(customer, booking(at(18, 30), 5))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancel_completed_rejected() {
        let (engine, customer) = setup().await;
        let created = engine
            .create(customer.clone(), booking(at(18, 0), 5))
            .await
            .unwrap();
        let id = created.id.unwrap().to_string();

        engine
            .update(
                &id,
                ReservationUpdate {
                    status: Some(ReservationStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = engine.cancel(&customer, &id).await.unwrap_err();
        assert!(matches!(err, ReservationError::AlreadyCompleted));
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_bookings() {
        let (engine, customer) = setup().await;

        let mut no_phone = booking(at(18, 0), 5);
        no_phone.contact_phone = "  ".to_string();
        assert!(engine.create(customer.clone(), no_phone).await.is_err());

        let mut bad_table = booking(at(18, 0), 5);
        bad_table.table_number = 21;
        assert!(engine.create(customer.clone(), bad_table).await.is_err());

        let mut bad_party = booking(at(18, 0), 5);
        bad_party.party_size = 0;
        assert!(engine.create(customer, bad_party).await.is_err());
    }

    #[tokio::test]
    async fn test_slots_reflect_blocking_reservations() {
        let (engine, customer) = setup().await;
        engine
            .create(customer.clone(), booking(at(12, 0), 5))
            .await
            .unwrap();
        // Cancelled bookings do not block
        let cancelled = engine
            .create(customer.clone(), booking(at(12, 0), 6))
            .await
            .unwrap();
        engine
            .cancel(&customer, &cancelled.id.unwrap().to_string())
            .await
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let slots = engine.available_slots(day, 2).await.unwrap();
        assert_eq!(slots.len(), 24);

        let noon = slots
            .iter()
            .find(|s| s.time.timestamp_millis() == at(12, 0))
            .unwrap();
        assert_eq!(noon.available_tables, 19);
        assert!(noon.available);

        let morning = slots
            .iter()
            .find(|s| s.time.timestamp_millis() == at(10, 0))
            .unwrap();
        assert_eq!(morning.available_tables, 20);
    }

    #[tokio::test]
    async fn test_slots_reject_oversized_party() {
        let (engine, _) = setup().await;
        let day = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        assert!(engine.available_slots(day, 0).await.is_err());
        assert!(engine.available_slots(day, 500).await.is_err());
    }

    #[tokio::test]
    async fn test_customer_scoping() {
        let (engine, customer) = setup().await;
        let created = engine
            .create(customer.clone(), booking(at(18, 0), 5))
            .await
            .unwrap();
        let id = created.id.unwrap().to_string();

        let stranger = RecordId::from_table_key("user", "mallory");
        let err = engine.get(&id, Some(&stranger)).await.unwrap_err();
        assert!(matches!(err, ReservationError::NotFound));

        // Staff scope (None) sees everything
        engine.get(&id, None).await.unwrap();
    }
}
