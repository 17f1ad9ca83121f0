//! Unified Result Types

use crate::AppError;

/// Application-level Result type used in HTTP handlers
pub type AppResult<T> = Result<T, AppError>;
