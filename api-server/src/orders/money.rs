//! Money arithmetic for order totals
//!
//! Line totals accumulate as `Decimal` and convert to `f64` once,
//! rounded to 2 places, at the storage boundary.

use rust_decimal::prelude::*;

use super::OrderError;
use crate::db::models::OrderItemInput;

const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per line
const MAX_QUANTITY: i64 = 999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate an incoming order line before price lookup
pub fn validate_order_item(item: &OrderItemInput) -> Result<(), OrderError> {
    if item.menu_item.trim().is_empty() {
        return Err(OrderError::InvalidOperation(
            "menu_item is required".to_string(),
        ));
    }
    if item.quantity <= 0 {
        return Err(OrderError::InvalidOperation(format!(
            "quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidOperation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, item.quantity
        )));
    }
    Ok(())
}

/// Sum of price * quantity over captured lines, rounded once at the end
pub fn order_total(lines: &[(f64, i64)]) -> f64 {
    let total: Decimal = lines
        .iter()
        .map(|(price, quantity)| to_decimal(*price) * Decimal::from(*quantity))
        .sum();
    to_f64(total)
}
