//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`. All require auth.
///
/// ```text
/// GET  /              -> list_mine
/// POST /              -> create (online checkout)
/// GET  /{id}          -> get_by_id
/// POST /{id}/cancel   -> cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::list_mine).post(booking::create))
        .route("/{id}", get(booking::get_by_id))
        .route("/{id}/cancel", post(booking::cancel))
}
