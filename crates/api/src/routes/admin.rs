//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, blog, coupon, destination};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /users                 -> list_users
/// POST   /users                 -> create_user
/// PUT    /users/{id}            -> update_user
/// GET    /roles                 -> list_roles
///
/// POST   /destinations          -> destination::create
/// PUT    /destinations/{id}     -> destination::update
/// DELETE /destinations/{id}     -> destination::delete
///
/// GET    /coupons               -> coupon::list
/// POST   /coupons               -> coupon::create
/// GET    /coupons/{id}          -> coupon::get_by_id
/// PUT    /coupons/{id}          -> coupon::update
/// DELETE /coupons/{id}          -> coupon::delete
///
/// GET    /blogs                 -> blog::list_all
/// POST   /blogs                 -> blog::create
/// GET    /blogs/{id}            -> blog::get_by_id
/// PUT    /blogs/{id}            -> blog::update
/// DELETE /blogs/{id}            -> blog::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/{id}", put(admin::update_user))
        .route("/roles", get(admin::list_roles))
        .route("/destinations", post(destination::create))
        .route(
            "/destinations/{id}",
            put(destination::update).delete(destination::delete),
        )
        .route("/coupons", get(coupon::list).post(coupon::create))
        .route(
            "/coupons/{id}",
            get(coupon::get_by_id)
                .put(coupon::update)
                .delete(coupon::delete),
        )
        .route("/blogs", get(blog::list_all).post(blog::create))
        .route(
            "/blogs/{id}",
            get(blog::get_by_id).put(blog::update).delete(blog::delete),
        )
}
