//! Time-slot availability math
//!
//! The restaurant floor is modelled as aggregate capacity: 20 tables of
//! 4 seats each. Availability for a day is reported as 30-minute slot
//! boundaries between 10:00 and 22:00; a party occupies its table for
//! 90 minutes from the slot start. The count of overlapping
//! reservations stands in for the number of tables consumed, so this is
//! a capacity heuristic, not a per-table allocator.
//!
//! All instants are unix-milliseconds; days are interpreted in UTC.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Physical tables on the floor
pub const TOTAL_TABLES: u32 = 20;
/// Seats per table
pub const SEATS_PER_TABLE: u32 = 4;
/// Slot boundary granularity (minutes)
pub const SLOT_INTERVAL_MIN: i64 = 30;
/// How long a slot occupies its table (minutes)
pub const SLOT_OCCUPANCY_MIN: i64 = 90;
/// First bookable slot boundary (local hour)
pub const SERVICE_OPEN_HOUR: u32 = 10;
/// Service window end; no slot starts at or after this hour
pub const SERVICE_CLOSE_HOUR: u32 = 22;
/// Default reservation duration (minutes)
pub const DEFAULT_DURATION_MIN: i64 = 90;

const MINUTE_MS: i64 = 60_000;

/// The time span held by one existing reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationWindow {
    /// Reservation start (unix millis)
    pub start_ms: i64,
    /// Duration in minutes
    pub duration_min: i64,
}

impl ReservationWindow {
    pub fn new(start_ms: i64, duration_min: i64) -> Self {
        Self {
            start_ms,
            duration_min,
        }
    }

    pub fn end_ms(&self) -> i64 {
        self.start_ms + self.duration_min * MINUTE_MS
    }

    /// Half-open interval overlap against `[slot_start, slot_end)`.
    ///
    /// Boundary-touching intervals do not overlap: a reservation ending
    /// exactly when the slot starts leaves the table free.
    pub fn overlaps(&self, slot_start_ms: i64, slot_end_ms: i64) -> bool {
        self.start_ms < slot_end_ms && self.end_ms() > slot_start_ms
    }
}

/// Tables needed to seat a party
pub fn tables_needed(party_size: u32) -> u32 {
    party_size.div_ceil(SEATS_PER_TABLE)
}

/// The window inside which an existing reservation on the same table
/// conflicts with a request starting at `requested_start_ms`.
///
/// The window is symmetric around the requested start using the
/// requester's own duration, with exclusive bounds so that a
/// reservation beginning exactly one duration before or after the
/// request (back-to-back seating) is not a conflict.
pub fn conflict_window(requested_start_ms: i64, duration_min: i64) -> (i64, i64) {
    let span = duration_min * MINUTE_MS;
    (requested_start_ms - span, requested_start_ms + span)
}

/// One reported availability slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Slot start
    pub time: DateTime<Utc>,
    /// Whether the requested party fits in this slot
    pub available: bool,
    /// Tables free during the slot's occupancy window
    pub available_tables: i64,
}

/// Compute the availability grid for one day.
///
/// Produces a slot for every 30-minute boundary in [10:00, 22:00),
/// counting reservations whose own `[start, start + duration)` interval
/// intersects the slot's 90-minute occupancy window. Recomputed fresh
/// per call; no state is kept between calls.
pub fn compute_time_slots(
    day: NaiveDate,
    party_size: u32,
    reservations: &[ReservationWindow],
) -> Vec<TimeSlot> {
    let needed = tables_needed(party_size) as i64;
    let midnight = day.and_time(NaiveTime::MIN).and_utc();
    let close = midnight + Duration::hours(SERVICE_CLOSE_HOUR as i64);

    let mut slots = Vec::new();
    let mut slot_time = midnight + Duration::hours(SERVICE_OPEN_HOUR as i64);
    while slot_time < close {
        let slot_start = slot_time.timestamp_millis();
        let slot_end = slot_start + SLOT_OCCUPANCY_MIN * MINUTE_MS;

        let reserved = reservations
            .iter()
            .filter(|r| r.overlaps(slot_start, slot_end))
            .count() as i64;
        let available_tables = TOTAL_TABLES as i64 - reserved;

        slots.push(TimeSlot {
            time: slot_time,
            available: available_tables >= needed,
            available_tables,
        });

        slot_time += Duration::minutes(SLOT_INTERVAL_MIN);
    }

    slots
}
