//! Route definitions for the `/time-slots` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::time_slot;
use crate::state::AppState;

/// Routes mounted at `/time-slots`.
///
/// ```text
/// PUT    /{id}   -> update (owner)
/// DELETE /{id}   -> delete (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(time_slot::update).delete(time_slot::delete))
}
