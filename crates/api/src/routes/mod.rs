pub mod activity;
pub mod admin;
pub mod auth;
pub mod blog;
pub mod booking;
pub mod coupon;
pub mod destination;
pub mod experience;
pub mod health;
pub mod payment;
pub mod time_slot;
pub mod vendor;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user (requires auth)
///
/// /destinations                                    list (public)
/// /destinations/{id}                               get with experiences (public)
/// /destinations/by-slug/{slug}                     get with experiences (public)
///
/// /experiences                                     list (public), create (vendor)
/// /experiences/{id}                                get (public), update, deactivate (owner)
/// /experiences/{id}/activities                     list (public), create (owner)
///
/// /activities/{id}                                 get (public), update, deactivate (owner)
/// /activities/{id}/time-slots                      list (public), create (owner)
/// /activities/{id}/availability                    slot availability (public)
///
/// /time-slots/{id}                                 update, delete (owner)
///
/// /coupons/validate                                price with coupon (public)
///
/// /payments/orders                                 open gateway order (requires auth)
///
/// /bookings                                        list own, online checkout (requires auth)
/// /bookings/{id}                                   get (customer, owning vendor, admin)
/// /bookings/{id}/cancel                            cancel (customer or admin)
///
/// /vendor/experiences                              own experiences (vendor)
/// /vendor/bookings                                 list, offline booking (vendor)
/// /vendor/bookings/by-reference/{reference}        check-in lookup (vendor)
///
/// /blogs                                           published posts (public)
/// /blogs/{slug}                                    published post (public)
///
/// /admin/users                                     list, create (admin only)
/// /admin/users/{id}                                update
/// /admin/roles                                     list
/// /admin/destinations                              create
/// /admin/destinations/{id}                         update, delete
/// /admin/coupons                                   list, create
/// /admin/coupons/{id}                              get, update, delete
/// /admin/blogs                                     list (drafts included), create
/// /admin/blogs/{id}                                get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Admin back office (users, catalogue, coupons, CMS).
        .nest("/admin", admin::router())
        // Public catalogue.
        .nest("/destinations", destination::router())
        .nest("/experiences", experience::router())
        .nest("/activities", activity::router())
        .nest("/time-slots", time_slot::router())
        .nest("/blogs", blog::router())
        // Checkout.
        .nest("/coupons", coupon::router())
        .nest("/payments", payment::router())
        .nest("/bookings", booking::router())
        // Vendor back office.
        .nest("/vendor", vendor::router())
}
