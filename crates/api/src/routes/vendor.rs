//! Route definitions for the `/vendor` back office.

use axum::routing::get;
use axum::Router;

use crate::handlers::vendor;
use crate::state::AppState;

/// Routes mounted at `/vendor`. Vendor or admin role required.
///
/// ```text
/// GET  /experiences                         -> list_experiences
/// GET  /bookings                            -> list_bookings
/// POST /bookings                            -> create_offline_booking
/// GET  /bookings/by-reference/{reference}   -> get_by_reference
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/experiences", get(vendor::list_experiences))
        .route(
            "/bookings",
            get(vendor::list_bookings).post(vendor::create_offline_booking),
        )
        .route(
            "/bookings/by-reference/{reference}",
            get(vendor::get_by_reference),
        )
}
