//! Reservation Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::ReservationStatus;
use shared::reservation::{DEFAULT_DURATION_MIN, ReservationWindow};

/// Reservation entity
///
/// `reservation_date` is unix millis so window comparisons stay plain
/// integer arithmetic in queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    pub reservation_date: i64,
    pub party_size: i64,
    pub table_number: i64,
    pub status: ReservationStatus,
    pub special_requests: Option<String>,
    /// Minutes
    pub duration: i64,
    pub contact_phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Reservation {
    pub fn window(&self) -> ReservationWindow {
        ReservationWindow {
            start_ms: self.reservation_date,
            duration_min: self.duration,
        }
    }
}

/// Payload for booking a table
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationCreate {
    pub reservation_date: i64,
    pub party_size: i64,
    pub table_number: i64,
    pub special_requests: Option<String>,
    pub duration: Option<i64>,
    pub contact_phone: String,
}

impl ReservationCreate {
    pub fn duration_or_default(&self) -> i64 {
        self.duration.unwrap_or(DEFAULT_DURATION_MIN)
    }
}

/// Partial update payload for a reservation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationUpdate {
    pub reservation_date: Option<i64>,
    pub party_size: Option<i64>,
    pub table_number: Option<i64>,
    pub status: Option<ReservationStatus>,
    pub special_requests: Option<String>,
    pub duration: Option<i64>,
    pub contact_phone: Option<String>,
}
