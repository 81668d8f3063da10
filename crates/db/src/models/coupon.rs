//! Coupon entity model and DTOs.

use bucketlist_core::coupon::{CouponTerms, DiscountType};
use bucketlist_core::error::CoreError;
use bucketlist_core::types::{DbId, MinorAmount, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A coupon row from the `coupons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Coupon {
    pub id: DbId,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: String,
    pub discount_value: i64,
    pub min_order_amount: Option<MinorAmount>,
    pub max_discount: Option<MinorAmount>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub valid_from: Option<Timestamp>,
    pub valid_until: Option<Timestamp>,
    /// When set, the coupon only applies to this experience.
    pub experience_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Coupon {
    /// Convert to the pure rule set used by pricing.
    pub fn terms(&self) -> Result<CouponTerms, CoreError> {
        Ok(CouponTerms {
            code: self.code.clone(),
            discount_type: DiscountType::parse(&self.discount_type)?,
            discount_value: self.discount_value,
            min_order_amount: self.min_order_amount,
            max_discount: self.max_discount,
            usage_limit: self.usage_limit,
            used_count: self.used_count,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            is_active: self.is_active,
        })
    }

    /// Whether the coupon may be used for `experience_id`.
    pub fn applies_to(&self, experience_id: DbId) -> bool {
        self.experience_id.map_or(true, |id| id == experience_id)
    }
}

/// DTO for creating a coupon. `code` is normalized before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCoupon {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_order_amount: Option<MinorAmount>,
    pub max_discount: Option<MinorAmount>,
    pub usage_limit: Option<i32>,
    pub valid_from: Option<Timestamp>,
    pub valid_until: Option<Timestamp>,
    pub experience_id: Option<DbId>,
}

/// DTO for updating a coupon. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCoupon {
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<i64>,
    pub min_order_amount: Option<MinorAmount>,
    pub max_discount: Option<MinorAmount>,
    pub usage_limit: Option<i32>,
    pub valid_from: Option<Timestamp>,
    pub valid_until: Option<Timestamp>,
    pub is_active: Option<bool>,
}
