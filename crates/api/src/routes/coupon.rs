//! Route definitions for the public `/coupons` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::coupon;
use crate::state::AppState;

/// Routes mounted at `/coupons`.
///
/// ```text
/// POST /validate   -> validate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/validate", post(coupon::validate))
}
