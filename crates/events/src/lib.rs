//! Bucketlist event bus and customer notification delivery.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`booking`]: the [`BookingEvent`]s the API publishes.
//! - [`delivery`]: external delivery channels (email).

pub mod booking;
pub mod bus;
pub mod delivery;

pub use booking::{BookingCancelled, BookingConfirmed, BookingEvent};
pub use bus::{EventBus, EventEnvelope};
pub use delivery::email::{EmailConfig, EmailDelivery};
