//! Order domain types
//!
//! Status enums for the order lifecycle and the transition rules
//! between them. The rules live here, next to the types, so both the
//! server and any client render the same state machine.

mod types;

pub use types::{OrderStatus, OrderType, PaymentMethod, PaymentStatus};
