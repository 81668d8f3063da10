//! Route definitions for the `/activities` resource.
//!
//! Also nests time slots and availability under `/activities/{id}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{activity, availability, time_slot};
use crate::state::AppState;

/// Routes mounted at `/activities`.
///
/// ```text
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update (owner)
/// DELETE /{id}                -> deactivate (owner)
///
/// GET    /{id}/time-slots     -> time_slot::list_by_activity
/// POST   /{id}/time-slots     -> time_slot::create (owner)
///
/// GET    /{id}/availability   -> availability::get_availability
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(activity::get_by_id)
                .put(activity::update)
                .delete(activity::deactivate),
        )
        .route(
            "/{id}/time-slots",
            get(time_slot::list_by_activity).post(time_slot::create),
        )
        .route("/{id}/availability", get(availability::get_availability))
}
