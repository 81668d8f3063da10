//! Booking notification delivery.
//!
//! The [`BookingNotifier`] subscribes to the event bus and emails the
//! contact of every confirmed booking. Delivery is best effort: failures
//! are logged and never reach the request that created the booking.

pub mod booking;

pub use booking::{BookingNotifier, ConfirmationMailer};
