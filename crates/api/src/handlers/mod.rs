//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `bucketlist_db`
//! (or to [`crate::checkout`] for bookings) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod activity;
pub mod admin;
pub mod auth;
pub mod availability;
pub mod blog;
pub mod booking;
pub mod coupon;
pub mod destination;
pub mod experience;
pub mod payment;
pub mod time_slot;
pub mod vendor;
