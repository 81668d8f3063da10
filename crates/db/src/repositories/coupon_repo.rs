//! Repository for the `coupons` table.

use bucketlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::coupon::{Coupon, CreateCoupon, UpdateCoupon};

const COLUMNS: &str = "id, code, description, discount_type, discount_value, min_order_amount, \
                       max_discount, usage_limit, used_count, valid_from, valid_until, \
                       experience_id, is_active, created_at, updated_at";

/// Provides CRUD operations for coupons.
///
/// `used_count` is only ever incremented inside the booking transaction
/// (see [`BookingRepo::create_confirmed`](super::BookingRepo::create_confirmed)).
pub struct CouponRepo;

impl CouponRepo {
    /// Insert a coupon. `code` must already be normalized.
    pub async fn create(
        pool: &PgPool,
        code: &str,
        input: &CreateCoupon,
    ) -> Result<Coupon, sqlx::Error> {
        let query = format!(
            "INSERT INTO coupons
                (code, description, discount_type, discount_value, min_order_amount,
                 max_discount, usage_limit, valid_from, valid_until, experience_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coupon>(&query)
            .bind(code)
            .bind(&input.description)
            .bind(input.discount_type.as_str())
            .bind(input.discount_value)
            .bind(input.min_order_amount)
            .bind(input.max_discount)
            .bind(input.usage_limit)
            .bind(input.valid_from)
            .bind(input.valid_until)
            .bind(input.experience_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coupons WHERE id = $1");
        sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up a coupon by its normalized code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coupons WHERE code = $1");
        sqlx::query_as::<_, Coupon>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Coupon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coupons ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Coupon>(&query).fetch_all(pool).await
    }

    /// Update a coupon. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCoupon,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!(
            "UPDATE coupons SET
                description = COALESCE($2, description),
                discount_type = COALESCE($3, discount_type),
                discount_value = COALESCE($4, discount_value),
                min_order_amount = COALESCE($5, min_order_amount),
                max_discount = COALESCE($6, max_discount),
                usage_limit = COALESCE($7, usage_limit),
                valid_from = COALESCE($8, valid_from),
                valid_until = COALESCE($9, valid_until),
                is_active = COALESCE($10, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(input.discount_type.map(|t| t.as_str()))
            .bind(input.discount_value)
            .bind(input.min_order_amount)
            .bind(input.max_discount)
            .bind(input.usage_limit)
            .bind(input.valid_from)
            .bind(input.valid_until)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a coupon. Bookings that used it keep their amounts.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM coupons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
