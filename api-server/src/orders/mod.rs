//! Order Lifecycle
//!
//! Everything that moves an order through its life: creation with
//! price capture, the mock payment flow, refunds, kitchen status
//! transitions and customer cancellation.

pub mod manager;
pub mod money;

pub use manager::OrderManager;

use thiserror::Error;

use crate::db::repository::RepoError;

/// Order domain errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,

    #[error("Menu item {0} is not available")]
    ItemUnavailable(String),

    #[error("Order is already paid")]
    AlreadyPaid,

    #[error("Cannot process payment for cancelled order")]
    OrderCancelled,

    #[error("Payment failed. Please check your card details.")]
    PaymentFailed,

    #[error("Cannot refund unpaid order")]
    NotPaid,

    #[error("Cannot refund completed order")]
    AlreadyCompleted,

    #[error("Cannot cancel order after it has been confirmed")]
    NotCancellable,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}
