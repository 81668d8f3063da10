//! Time slot entity model and DTOs.

use bucketlist_core::availability::SlotCapacity;
use bucketlist_core::types::{DbId, Timestamp};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A time slot row: a daily window with fixed capacity for one activity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeSlot {
    pub id: DbId,
    pub activity_id: DbId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&TimeSlot> for SlotCapacity {
    fn from(slot: &TimeSlot) -> Self {
        SlotCapacity {
            slot_id: slot.id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            capacity: slot.capacity,
        }
    }
}

/// DTO for creating a time slot. `activity_id` comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i32,
}

/// DTO for updating a time slot. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTimeSlot {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub capacity: Option<i32>,
}
