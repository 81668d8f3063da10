//! Coupon rules: code normalization and discount evaluation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{MinorAmount, Timestamp};

/// Maximum length of a coupon code after normalization.
pub const MAX_CODE_LEN: usize = 32;

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount_value` is a whole percentage (1..=100).
    Percentage,
    /// `discount_value` is an amount in minor units.
    Flat,
}

impl DiscountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Flat => "flat",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "percentage" => Ok(Self::Percentage),
            "flat" => Ok(Self::Flat),
            other => Err(CoreError::Validation(format!(
                "Unknown discount_type '{other}'"
            ))),
        }
    }
}

/// The subset of a coupon row that decides whether and how much it discounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponTerms {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_order_amount: Option<MinorAmount>,
    pub max_discount: Option<MinorAmount>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub valid_from: Option<Timestamp>,
    pub valid_until: Option<Timestamp>,
    pub is_active: bool,
}

/// Trim and upper-case a user-entered code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Validate a code for the admin editor (after normalization).
pub fn validate_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() || code.len() > MAX_CODE_LEN {
        return Err(CoreError::Validation(format!(
            "code must be 1 to {MAX_CODE_LEN} characters"
        )));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(
            "code may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }
    Ok(())
}

/// Validate discount settings for the admin editor.
pub fn validate_discount(
    discount_type: DiscountType,
    discount_value: i64,
) -> Result<(), CoreError> {
    match discount_type {
        DiscountType::Percentage if !(1..=100).contains(&discount_value) => Err(
            CoreError::Validation("percentage discount must be between 1 and 100".to_string()),
        ),
        DiscountType::Flat if discount_value <= 0 => Err(CoreError::Validation(
            "flat discount must be positive".to_string(),
        )),
        _ => Ok(()),
    }
}

impl CouponTerms {
    /// Check that the coupon can be applied right now to an order of `subtotal`.
    pub fn ensure_applicable(
        &self,
        subtotal: MinorAmount,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        if !self.is_active {
            return Err(invalid(&self.code, "is not active"));
        }
        if self.valid_from.is_some_and(|from| now < from) {
            return Err(invalid(&self.code, "is not valid yet"));
        }
        if self.valid_until.is_some_and(|until| now > until) {
            return Err(invalid(&self.code, "has expired"));
        }
        if self.usage_limit.is_some_and(|limit| self.used_count >= limit) {
            return Err(invalid(&self.code, "has reached its usage limit"));
        }
        if let Some(min) = self.min_order_amount {
            if subtotal < min {
                return Err(invalid(&self.code, "requires a higher order amount"));
            }
        }
        Ok(())
    }

    /// Discount in minor units for an order of `subtotal`.
    ///
    /// Percentage discounts round down and are capped at `max_discount`. The
    /// result never exceeds `subtotal`.
    pub fn discount_for(
        &self,
        subtotal: MinorAmount,
        now: Timestamp,
    ) -> Result<MinorAmount, CoreError> {
        self.ensure_applicable(subtotal, now)?;

        let raw = match self.discount_type {
            DiscountType::Percentage => {
                subtotal
                    .checked_mul(self.discount_value)
                    .ok_or_else(|| CoreError::Validation("order amount is too large".to_string()))?
                    / 100
            }
            DiscountType::Flat => self.discount_value,
        };
        let capped = match self.max_discount {
            Some(cap) => raw.min(cap),
            None => raw,
        };
        Ok(capped.clamp(0, subtotal.max(0)))
    }
}

fn invalid(code: &str, reason: &str) -> CoreError {
    CoreError::Validation(format!("Coupon {code} {reason}"))
}
