//! Handlers for customer bookings: online checkout, listing, cancellation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::booking::{generate_booking_reference, BookingStatus};
use bucketlist_core::error::CoreError;
use bucketlist_core::participant::ParticipantDetails;
use bucketlist_core::types::DbId;
use bucketlist_db::models::booking::{
    Booking, BookingListQuery, BookingWithParticipants, NewBooking,
};
use bucketlist_db::repositories::{BookingRepo, ExperienceRepo};
use bucketlist_events::{BookingCancelled, BookingEvent};
use serde::Deserialize;

use crate::checkout::{self, BookingSelection};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// What the checkout widget hands back after a successful payment.
#[derive(Debug, Deserialize)]
pub struct PaymentProof {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(flatten)]
    pub selection: BookingSelection,
    pub coupon_code: Option<String>,
    pub contact: ParticipantDetails,
    /// Defaults to the contact alone when empty.
    #[serde(default)]
    pub participants: Vec<ParticipantDetails>,
    pub note: Option<String>,
    pub payment: PaymentProof,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings
///
/// Completes an online checkout: verifies the payment signature and the
/// order amount, then inserts the booking as confirmed under the slot lock.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingWithParticipants>)> {
    let payment = &input.payment;
    if !state
        .payments
        .verify_signature(&payment.order_id, &payment.payment_id, &payment.signature)
    {
        tracing::warn!(
            user_id = auth_user.user_id,
            order_id = %payment.order_id,
            "Payment signature mismatch"
        );
        return Err(AppError::BadRequest(
            "Payment signature verification failed".into(),
        ));
    }

    let created = create_paid(&state, &auth_user, &input)
        .await
        .inspect_err(|e| {
            tracing::warn!(
                user_id = auth_user.user_id,
                order_id = %payment.order_id,
                payment_id = %payment.payment_id,
                "Paid checkout refused, payment needs a refund unless retried: {e}"
            );
        })?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Book a verified payment. Every error here leaves a captured payment behind.
async fn create_paid(
    state: &AppState,
    auth_user: &AuthUser,
    input: &CreateBookingRequest,
) -> AppResult<BookingWithParticipants> {
    let payment = &input.payment;
    let resolved = checkout::resolve_selection(state, input.selection).await?;
    let (contact, participants) = checkout::collect_participants(
        &input.contact,
        &input.participants,
        resolved.request.participants,
    )?;

    let coupon = checkout::resolve_coupon(
        state,
        input.coupon_code.as_deref(),
        resolved.experience.id,
    )
    .await?;
    let quote = checkout::price(&resolved, coupon.as_ref())?;
    checkout::ensure_payable(&quote)?;

    let order = state.payments.fetch_order(&payment.order_id).await?;
    let currency_matches = order
        .currency
        .eq_ignore_ascii_case(&resolved.activity.currency);
    if order.amount != quote.total || !currency_matches {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Paid order {} does not match the booking total",
            order.id
        ))));
    }

    let new_booking = NewBooking {
        reference: generate_booking_reference(),
        user_id: Some(auth_user.user_id),
        experience_id: resolved.experience.id,
        activity_id: resolved.activity.id,
        time_slot_id: resolved.slot.id,
        booking_date: resolved.request.booking_date,
        total_participants: resolved.request.participants,
        subtotal_amount: quote.subtotal,
        discount_amount: quote.discount,
        total_amount: quote.total,
        currency: resolved.activity.currency.clone(),
        coupon_id: coupon.as_ref().map(|c| c.id),
        contact,
        participants,
        is_offline: false,
        payment_order_id: Some(payment.order_id.clone()),
        payment_id: Some(payment.payment_id.clone()),
        note: input.note.clone(),
        created_by: Some(auth_user.user_id),
    };

    checkout::confirm_booking(state, &resolved, new_booking, auth_user.user_id).await
}

/// GET /api/v1/bookings
///
/// The caller's own bookings.
pub async fn list_mine(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<BookingListQuery>,
) -> AppResult<Json<DataResponse<Vec<Booking>>>> {
    let bookings = BookingRepo::list_for_user(&state.pool, auth_user.user_id, &params).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /api/v1/bookings/{id}
///
/// Visible to the booking's customer, the vendor owning the experience
/// and admins.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<BookingWithParticipants>> {
    let booking = BookingRepo::find_with_participants(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    if booking.booking.user_id != Some(auth_user.user_id) && !auth_user.is_admin() {
        let vendor_id = ExperienceRepo::find_by_id(&state.pool, booking.booking.experience_id)
            .await?
            .map(|e| e.vendor_id);
        if vendor_id != Some(auth_user.user_id) {
            // Same answer as a missing booking, so ids cannot be probed.
            return Err(not_found(id));
        }
    }
    Ok(Json(booking))
}

/// POST /api/v1/bookings/{id}/cancel
///
/// The booking's customer or an admin may cancel a confirmed booking. The
/// spots are released immediately since only confirmed bookings count.
pub async fn cancel(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    if booking.user_id != Some(auth_user.user_id) && !auth_user.is_admin() {
        return Err(not_found(id));
    }
    if !auth_user.is_admin() && booking.booking_date < state.config.today() {
        return Err(AppError::Core(CoreError::Validation(
            "Bookings for past dates cannot be cancelled".into(),
        )));
    }
    booking.status()?.validate_transition(BookingStatus::Cancelled)?;

    let cancelled = BookingRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Booking is already cancelled".into())))?;

    tracing::info!(
        booking_id = id,
        reference = %cancelled.reference,
        actor = auth_user.user_id,
        "Booking cancelled"
    );
    state.event_bus.publish(
        BookingEvent::Cancelled(BookingCancelled {
            booking_id: id,
            reference: cancelled.reference.clone(),
            time_slot_id: cancelled.time_slot_id,
            booking_date: cancelled.booking_date,
            participants: cancelled.total_participants,
        }),
        Some(auth_user.user_id),
    );

    Ok(Json(cancelled))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Booking",
        id,
    })
}
