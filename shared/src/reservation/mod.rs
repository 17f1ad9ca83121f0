//! Reservation domain types
//!
//! Reservation status plus the table-availability math: fixed-length
//! time slots, half-open interval overlap and the conflict window used
//! when booking a table.

mod slots;

pub use slots::{
    DEFAULT_DURATION_MIN, ReservationWindow, SEATS_PER_TABLE, SLOT_INTERVAL_MIN,
    SLOT_OCCUPANCY_MIN, SERVICE_CLOSE_HOUR, SERVICE_OPEN_HOUR, TOTAL_TABLES, TimeSlot,
    compute_time_slots, conflict_window, tables_needed,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Statuses that hold a table against new bookings.
    ///
    /// Only pending and confirmed reservations block a table; seated
    /// parties are tracked by staff, and completed/cancelled ones have
    /// released it. Conflict and availability queries bind this list
    /// directly.
    pub const BLOCKING: [ReservationStatus; 2] =
        [ReservationStatus::Pending, ReservationStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Does this reservation hold its table against new bookings?
    pub fn blocks_table(&self) -> bool {
        Self::BLOCKING.contains(self)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_statuses() {
        assert!(ReservationStatus::Pending.blocks_table());
        assert!(ReservationStatus::Confirmed.blocks_table());
        assert!(!ReservationStatus::Seated.blocks_table());
        assert!(!ReservationStatus::Completed.blocks_table());
        assert!(!ReservationStatus::Cancelled.blocks_table());
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Seated).unwrap(),
            "\"seated\""
        );
    }
}
