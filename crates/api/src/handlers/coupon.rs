//! Handlers for coupons: public validation and admin CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::availability::validate_participant_count;
use bucketlist_core::coupon::{normalize_code, validate_code, validate_discount, DiscountType};
use bucketlist_core::error::CoreError;
use bucketlist_core::pricing::{quote, PriceQuote};
use bucketlist_core::types::DbId;
use bucketlist_db::models::coupon::{Coupon, CreateCoupon, UpdateCoupon};
use bucketlist_db::repositories::{ActivityRepo, CouponRepo};
use chrono::Utc;
use serde::Deserialize;

use crate::checkout::resolve_coupon;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /coupons/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateCouponRequest {
    pub code: String,
    pub activity_id: DbId,
    pub participants: i32,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// POST /api/v1/coupons/validate
///
/// Price a party for an activity with the coupon applied. Any reason the
/// coupon cannot be used is reported as a 400.
pub async fn validate(
    State(state): State<AppState>,
    Json(input): Json<ValidateCouponRequest>,
) -> AppResult<Json<PriceQuote>> {
    validate_participant_count(input.participants)?;
    let activity = ActivityRepo::find_by_id(&state.pool, input.activity_id)
        .await?
        .filter(|a| a.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: input.activity_id,
        }))?;

    let coupon = resolve_coupon(&state, Some(&input.code), activity.experience_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Validation("code is required".into())))?;
    let terms = coupon.terms()?;

    let price = quote(
        activity.unit_price(),
        input.participants,
        Some(&terms),
        Utc::now(),
    )?;
    Ok(Json(price))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/coupons
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Coupon>>>> {
    let coupons = CouponRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: coupons }))
}

/// GET /api/v1/admin/coupons/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Coupon>> {
    let coupon = CouponRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(coupon))
}

/// POST /api/v1/admin/coupons
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCoupon>,
) -> AppResult<(StatusCode, Json<Coupon>)> {
    let code = normalize_code(&input.code);
    validate_code(&code)?;
    validate_discount(input.discount_type, input.discount_value)?;
    validate_limits(input.usage_limit, input.min_order_amount, input.max_discount)?;

    let coupon = CouponRepo::create(&state.pool, &code, &input).await?;
    tracing::info!(coupon_id = coupon.id, code = %coupon.code, "Coupon created");
    Ok((StatusCode::CREATED, Json(coupon)))
}

/// PUT /api/v1/admin/coupons/{id}
///
/// Discount settings are validated after overlaying the patch on the
/// stored coupon.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCoupon>,
) -> AppResult<Json<Coupon>> {
    let existing = CouponRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    let discount_type = match input.discount_type {
        Some(t) => t,
        None => DiscountType::parse(&existing.discount_type)?,
    };
    validate_discount(
        discount_type,
        input.discount_value.unwrap_or(existing.discount_value),
    )?;
    validate_limits(input.usage_limit, input.min_order_amount, input.max_discount)?;

    let coupon = CouponRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(coupon))
}

/// DELETE /api/v1/admin/coupons/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CouponRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn validate_limits(
    usage_limit: Option<i32>,
    min_order_amount: Option<i64>,
    max_discount: Option<i64>,
) -> AppResult<()> {
    if usage_limit.is_some_and(|l| l < 1) {
        return Err(AppError::Core(CoreError::Validation(
            "usage_limit must be at least 1".into(),
        )));
    }
    if min_order_amount.is_some_and(|m| m < 0) || max_discount.is_some_and(|m| m < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "coupon amounts must not be negative".into(),
        )));
    }
    Ok(())
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Coupon",
        id,
    })
}
