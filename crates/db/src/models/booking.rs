//! Booking entity model and DTOs.

use bucketlist_core::booking::BookingStatus;
use bucketlist_core::error::CoreError;
use bucketlist_core::participant::ParticipantDetails;
use bucketlist_core::types::{DbId, MinorAmount, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub reference: String,
    /// `None` for offline bookings made without a customer account.
    pub user_id: Option<DbId>,
    pub experience_id: DbId,
    pub activity_id: DbId,
    pub time_slot_id: DbId,
    pub booking_date: NaiveDate,
    pub total_participants: i32,
    pub status: String,
    pub subtotal_amount: MinorAmount,
    pub discount_amount: MinorAmount,
    pub total_amount: MinorAmount,
    pub currency: String,
    pub coupon_id: Option<DbId>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub is_offline: bool,
    pub payment_order_id: Option<String>,
    pub payment_id: Option<String>,
    pub note: Option<String>,
    pub created_by: Option<DbId>,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    pub fn status(&self) -> Result<BookingStatus, CoreError> {
        BookingStatus::parse(&self.status)
    }
}

/// A row from the `booking_participants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingParticipant {
    pub id: DbId,
    pub booking_id: DbId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: Timestamp,
}

/// A booking together with its participant records.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithParticipants {
    #[serde(flatten)]
    pub booking: Booking,
    pub participants: Vec<BookingParticipant>,
}

/// Confirmed participants per slot for one activity and date.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct SlotBookedCount {
    pub time_slot_id: DbId,
    pub participants: i64,
}

/// Everything needed to insert a confirmed booking.
///
/// Built by the API layer after pricing and (for online bookings) payment
/// verification. Participant records are expected to be validated already.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub reference: String,
    pub user_id: Option<DbId>,
    pub experience_id: DbId,
    pub activity_id: DbId,
    pub time_slot_id: DbId,
    pub booking_date: NaiveDate,
    pub total_participants: i32,
    pub subtotal_amount: MinorAmount,
    pub discount_amount: MinorAmount,
    pub total_amount: MinorAmount,
    pub currency: String,
    pub coupon_id: Option<DbId>,
    pub contact: ParticipantDetails,
    pub participants: Vec<ParticipantDetails>,
    pub is_offline: bool,
    pub payment_order_id: Option<String>,
    pub payment_id: Option<String>,
    pub note: Option<String>,
    pub created_by: Option<DbId>,
}

/// Result of a capacity-checked booking insert.
#[derive(Debug)]
pub enum BookingInsertOutcome {
    Created(BookingWithParticipants),
    /// The party no longer fits; nothing was written.
    SlotFull { available: i32 },
    /// The coupon reached its usage limit while the booking was in flight.
    CouponExhausted,
}

/// Query parameters for booking list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub experience_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
