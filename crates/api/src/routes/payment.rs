//! Route definitions for the `/payments` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST /orders   -> create_order (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/orders", post(payment::create_order))
}
