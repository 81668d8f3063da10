//! Vendor back-office handlers: own experiences, bookings and the offline
//! booking tool.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::booking::generate_booking_reference;
use bucketlist_core::error::CoreError;
use bucketlist_core::participant::ParticipantDetails;
use bucketlist_core::types::MinorAmount;
use bucketlist_db::models::booking::{
    Booking, BookingListQuery, BookingWithParticipants, NewBooking,
};
use bucketlist_db::models::experience::Experience;
use bucketlist_db::repositories::{BookingRepo, ExperienceRepo};
use serde::Deserialize;

use super::experience::load_owned_experience;
use crate::checkout::{self, BookingSelection};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireVendor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /vendor/bookings`.
#[derive(Debug, Deserialize)]
pub struct OfflineBookingRequest {
    #[serde(flatten)]
    pub selection: BookingSelection,
    /// The customer the booking is made for.
    pub contact: ParticipantDetails,
    /// Defaults to the contact alone when empty.
    #[serde(default)]
    pub participants: Vec<ParticipantDetails>,
    /// What was actually collected (cash, UPI at the counter). Defaults to
    /// the list price.
    pub amount_collected: Option<MinorAmount>,
    pub note: Option<String>,
}

/// GET /api/v1/vendor/experiences
pub async fn list_experiences(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Experience>>>> {
    let experiences = ExperienceRepo::list_by_vendor(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: experiences }))
}

/// GET /api/v1/vendor/bookings?booking_date=&status=&experience_id=
///
/// Vendors see bookings on their own experiences; admins see all.
pub async fn list_bookings(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Query(params): Query<BookingListQuery>,
) -> AppResult<Json<DataResponse<Vec<Booking>>>> {
    let bookings = if user.is_admin() {
        BookingRepo::list_all(&state.pool, &params).await?
    } else {
        BookingRepo::list_for_vendor(&state.pool, user.user_id, &params).await?
    };
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /api/v1/vendor/bookings/by-reference/{reference}
///
/// Check-in lookup by the code on the customer's confirmation. Vendors only
/// see bookings on their own experiences.
pub async fn get_by_reference(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> AppResult<Json<BookingWithParticipants>> {
    let reference = reference.trim().to_uppercase();
    let missing = || AppError::NotFound(format!("Booking '{reference}' not found"));

    let booking = BookingRepo::find_by_reference(&state.pool, &reference)
        .await?
        .ok_or_else(missing)?;
    if !user.is_admin() {
        let vendor_id = ExperienceRepo::find_by_id(&state.pool, booking.experience_id)
            .await?
            .map(|e| e.vendor_id);
        if vendor_id != Some(user.user_id) {
            return Err(missing());
        }
    }

    let participants = BookingRepo::list_participants(&state.pool, booking.id).await?;
    Ok(Json(BookingWithParticipants {
        booking,
        participants,
    }))
}

/// POST /api/v1/vendor/bookings
///
/// Book on behalf of a walk-in or phone customer. Same date and capacity
/// rules as the online checkout, without payment verification or coupons.
pub async fn create_offline_booking(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Json(input): Json<OfflineBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingWithParticipants>)> {
    load_owned_experience(&state, &user, input.selection.experience_id).await?;

    let resolved = checkout::resolve_selection(&state, input.selection).await?;
    let (contact, participants) = checkout::collect_participants(
        &input.contact,
        &input.participants,
        resolved.request.participants,
    )?;

    let quote = checkout::price(&resolved, None)?;
    let (discount, total) = match input.amount_collected {
        Some(amount) if amount < 0 => {
            return Err(AppError::Core(CoreError::Validation(
                "amount_collected must not be negative".into(),
            )));
        }
        Some(amount) => ((quote.subtotal - amount).max(0), amount),
        None => (quote.discount, quote.total),
    };

    let new_booking = NewBooking {
        reference: generate_booking_reference(),
        user_id: None,
        experience_id: resolved.experience.id,
        activity_id: resolved.activity.id,
        time_slot_id: resolved.slot.id,
        booking_date: resolved.request.booking_date,
        total_participants: resolved.request.participants,
        subtotal_amount: quote.subtotal,
        discount_amount: discount,
        total_amount: total,
        currency: resolved.activity.currency.clone(),
        coupon_id: None,
        contact,
        participants,
        is_offline: true,
        payment_order_id: None,
        payment_id: None,
        note: input.note,
        created_by: Some(user.user_id),
    };

    let created = checkout::confirm_booking(&state, &resolved, new_booking, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
