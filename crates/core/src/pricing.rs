//! Booking price quotes.

use serde::Serialize;

use crate::coupon::CouponTerms;
use crate::error::CoreError;
use crate::types::{MinorAmount, Timestamp};

/// Highest per-participant price accepted (10 crore in paise). Keeps every
/// quote comfortably inside `i64`.
pub const MAX_UNIT_PRICE: MinorAmount = 100_000_000_000;

/// Itemized price of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub unit_price: MinorAmount,
    pub participants: i32,
    pub subtotal: MinorAmount,
    pub discount: MinorAmount,
    pub total: MinorAmount,
    pub coupon_code: Option<String>,
}

/// The price a participant pays for an activity: the discounted price when
/// one is set and lower than the list price.
pub fn effective_unit_price(
    price: MinorAmount,
    discounted_price: Option<MinorAmount>,
) -> MinorAmount {
    match discounted_price {
        Some(discounted) if discounted >= 0 && discounted < price => discounted,
        _ => price,
    }
}

/// Validate a catalogue price field.
pub fn validate_price(field: &str, amount: MinorAmount) -> Result<(), CoreError> {
    if amount < 0 {
        return Err(CoreError::Validation(format!("{field} must not be negative")));
    }
    if amount > MAX_UNIT_PRICE {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_UNIT_PRICE}"
        )));
    }
    Ok(())
}

/// Price `participants` at `unit_price`, applying `coupon` if given.
pub fn quote(
    unit_price: MinorAmount,
    participants: i32,
    coupon: Option<&CouponTerms>,
    now: Timestamp,
) -> Result<PriceQuote, CoreError> {
    validate_price("unit price", unit_price)?;
    let subtotal = unit_price
        .checked_mul(i64::from(participants))
        .ok_or_else(|| CoreError::Validation("order amount is too large".to_string()))?;

    let discount = match coupon {
        Some(terms) => terms.discount_for(subtotal, now)?,
        None => 0,
    };

    Ok(PriceQuote {
        unit_price,
        participants,
        subtotal,
        discount,
        total: subtotal - discount,
        coupon_code: coupon.map(|c| c.code.clone()),
    })
}
