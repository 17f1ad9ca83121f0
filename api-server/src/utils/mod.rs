//! Utility module - shared helpers and types
//!
//! - [`AppError`] - application error type with HTTP mapping
//! - [`AppResult`] - handler result alias
//! - logging, time and validation helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;
