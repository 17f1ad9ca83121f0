//! Shared types for the restaurant platform
//!
//! Pure domain types and logic with no I/O: order and payment state
//! enums plus the transition rules between them, reservation status and
//! the time-slot availability math, and the JSON response envelope used
//! by every API handler.

pub mod order;
pub mod reservation;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use order::{OrderStatus, OrderType, PaymentMethod, PaymentStatus};
pub use reservation::ReservationStatus;
pub use response::{AppResponse, ListResponse, Pagination};
