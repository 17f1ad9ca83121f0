//! API Response types
//!
//! Standardized response envelopes for the whole platform.

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// All single-entity responses follow this format:
/// ```json
/// {
///     "success": true,
///     "data": { ... }
/// }
/// ```
///
/// Errors carry `success: false` and an `error` message instead of data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Create a successful response with a human-readable message
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pagination block for list responses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-based)
    pub page: u32,
    /// Total number of pages
    pub pages: u32,
}

impl Pagination {
    /// Compute the pagination block from a total row count and page size
    pub fn new(page: u32, total: u64, limit: u32) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as u64) as u32
        };
        Self { page, pages }
    }
}

/// List response envelope
///
/// ```json
/// {
///     "success": true,
///     "count": 10,
///     "total": 42,
///     "pagination": { "page": 1, "pages": 5 },
///     "data": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    /// Number of items in this page
    pub count: usize,
    /// Total matching items across all pages
    pub total: u64,
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self {
            success: true,
            count: data.len(),
            total,
            pagination: Pagination::new(page, total, limit),
            data,
        }
    }
}
