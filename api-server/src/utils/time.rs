//! Time helpers
//!
//! Instants are stored as i64 unix-milliseconds throughout the
//! database; chrono is used at the edges for parsing and formatting.

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::utils::AppError;

/// Current instant as unix milliseconds
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a `YYYY-MM-DD` date query parameter
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date: {value} (expected YYYY-MM-DD)")))
}

/// Unix-millisecond bounds of a UTC day: `[start, end)`
pub fn day_bounds_ms(day: NaiveDate) -> (i64, i64) {
    let start = day.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    (start, start + 24 * 60 * 60 * 1000)
}
