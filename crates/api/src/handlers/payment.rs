//! Handler for creating gateway orders ahead of the online checkout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::booking::generate_booking_reference;
use bucketlist_core::pricing::PriceQuote;
use bucketlist_core::types::MinorAmount;
use serde::{Deserialize, Serialize};

use crate::checkout::{self, BookingSelection};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /payments/orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(flatten)]
    pub selection: BookingSelection,
    pub coupon_code: Option<String>,
}

/// Everything the client needs to open the checkout widget.
#[derive(Debug, Serialize)]
pub struct PaymentOrderResponse {
    pub order_id: String,
    pub amount: MinorAmount,
    pub currency: String,
    /// Public gateway key id for the checkout widget.
    pub key_id: String,
    pub quote: PriceQuote,
}

/// POST /api/v1/payments/orders
///
/// Validates the selection, checks capacity, prices the booking and opens
/// a gateway order for the total. No booking is written yet.
pub async fn create_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<PaymentOrderResponse>)> {
    let resolved = checkout::resolve_selection(&state, input.selection).await?;
    checkout::ensure_capacity(&state, &resolved).await?;

    let coupon = checkout::resolve_coupon(
        &state,
        input.coupon_code.as_deref(),
        resolved.experience.id,
    )
    .await?;
    let quote = checkout::price(&resolved, coupon.as_ref())?;
    checkout::ensure_payable(&quote)?;

    let currency = resolved.activity.currency.clone();
    let receipt = generate_booking_reference();
    let order = state
        .payments
        .create_order(quote.total, &currency, &receipt)
        .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        order_id = %order.id,
        amount = quote.total,
        slot_id = resolved.slot.id,
        date = %resolved.request.booking_date,
        "Checkout order opened"
    );

    Ok((
        StatusCode::CREATED,
        Json(PaymentOrderResponse {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: state.payments.key_id().to_string(),
            quote,
        }),
    ))
}
