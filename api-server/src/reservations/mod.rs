//! Reservations
//!
//! Table booking with conflict detection and the half-hour
//! availability grid.

pub mod engine;

pub use engine::ReservationEngine;

use thiserror::Error;

use crate::db::repository::RepoError;

/// Reservation domain errors
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Reservation not found")]
    NotFound,

    #[error("Table is already reserved for this time slot")]
    TableConflict,

    #[error("Cannot cancel completed reservation")]
    AlreadyCompleted,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}
