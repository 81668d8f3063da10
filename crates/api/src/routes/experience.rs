//! Route definitions for the `/experiences` resource.
//!
//! Also nests the activity list under `/experiences/{id}/activities`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{activity, experience};
use crate::state::AppState;

/// Routes mounted at `/experiences`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create (vendor)
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update (owner)
/// DELETE /{id}              -> deactivate (owner)
///
/// GET    /{id}/activities   -> activity::list_by_experience
/// POST   /{id}/activities   -> activity::create (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(experience::list).post(experience::create))
        .route(
            "/{id}",
            get(experience::get_by_id)
                .put(experience::update)
                .delete(experience::deactivate),
        )
        .route(
            "/{id}/activities",
            get(activity::list_by_experience).post(activity::create),
        )
}
