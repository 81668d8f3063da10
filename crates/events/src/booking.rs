//! Booking lifecycle events.

use bucketlist_core::types::{DbId, MinorAmount};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A booking was inserted as confirmed (online payment verified or offline entry).
pub const EVENT_BOOKING_CONFIRMED: &str = "booking.confirmed";

/// A confirmed booking was cancelled and its spots released.
pub const EVENT_BOOKING_CANCELLED: &str = "booking.cancelled";

/// Everything the confirmation email needs, so subscribers never have to
/// query the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmed {
    pub booking_id: DbId,
    pub reference: String,
    pub contact_name: String,
    pub contact_email: String,
    pub experience_title: String,
    pub activity_name: String,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub participants: i32,
    pub total_amount: MinorAmount,
    pub currency: String,
    pub is_offline: bool,
}

/// The spots a cancellation released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCancelled {
    pub booking_id: DbId,
    pub reference: String,
    pub time_slot_id: DbId,
    pub booking_date: NaiveDate,
    pub participants: i32,
}

/// A change to a booking that subscribers may react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "booking")]
pub enum BookingEvent {
    #[serde(rename = "booking.confirmed")]
    Confirmed(BookingConfirmed),
    #[serde(rename = "booking.cancelled")]
    Cancelled(BookingCancelled),
}

impl BookingEvent {
    /// Dot-separated event name, as used in logs and on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Confirmed(_) => EVENT_BOOKING_CONFIRMED,
            Self::Cancelled(_) => EVENT_BOOKING_CANCELLED,
        }
    }

    pub fn booking_id(&self) -> DbId {
        match self {
            Self::Confirmed(b) => b.booking_id,
            Self::Cancelled(b) => b.booking_id,
        }
    }
}
