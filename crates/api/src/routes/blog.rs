//! Route definitions for the public `/blogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Routes mounted at `/blogs`.
///
/// ```text
/// GET /         -> list_published
/// GET /{slug}   -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list_published))
        .route("/{slug}", get(blog::get_by_slug))
}
