//! Route definitions for the public `/destinations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::destination;
use crate::state::AppState;

/// Routes mounted at `/destinations`.
///
/// ```text
/// GET /                 -> list
/// GET /{id}             -> get_by_id
/// GET /by-slug/{slug}   -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(destination::list))
        .route("/{id}", get(destination::get_by_id))
        .route("/by-slug/{slug}", get(destination::get_by_slug))
}
