//! Time-slot availability computation.
//!
//! A time slot is a daily window with a fixed capacity. For a given
//! activity and calendar date, the spots left in a slot are its capacity
//! minus the participants of every *confirmed* booking referencing it on
//! that date. A slot is offered as selectable only when the requested party
//! fits into what is left.
//!
//! Nothing here is cached: callers recompute from fresh query results every
//! time the date, activity or party size changes.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Largest party a single booking may carry.
pub const MAX_PARTICIPANTS_PER_BOOKING: i32 = 50;

/// Largest capacity a single time slot may be configured with.
pub const MAX_SLOT_CAPACITY: i32 = 10_000;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A time slot as seen by the availability computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCapacity {
    pub slot_id: DbId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i32,
}

/// Participant count of one confirmed booking (or a pre-aggregated group of
/// bookings) on a slot for the date being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBooking {
    pub slot_id: DbId,
    pub participants: i64,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Computed availability of one slot for a specific date and party size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub slot_id: DbId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i32,
    pub booked: i64,
    pub available: i32,
    pub selectable: bool,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Sum participant counts per slot id.
///
/// Slots without bookings are simply absent from the map; callers treat a
/// missing entry as zero booked.
pub fn booked_by_slot(bookings: &[SlotBooking]) -> HashMap<DbId, i64> {
    let mut totals: HashMap<DbId, i64> = HashMap::new();
    for booking in bookings {
        *totals.entry(booking.slot_id).or_insert(0) += booking.participants;
    }
    totals
}

/// Spots left in a slot: `max(0, capacity - booked)`.
pub fn available_spots(capacity: i32, booked: i64) -> i32 {
    let left = i64::from(capacity) - booked;
    // Clamped to [0, capacity], so the narrowing cannot overflow.
    left.clamp(0, i64::from(capacity.max(0))) as i32
}

/// Compute the availability of every slot for a party of `requested`.
///
/// The output preserves the order of `slots`.
pub fn compute_slot_availability(
    slots: &[SlotCapacity],
    bookings: &[SlotBooking],
    requested: i32,
) -> Vec<SlotAvailability> {
    let totals = booked_by_slot(bookings);
    slots
        .iter()
        .map(|slot| {
            let booked = totals.get(&slot.slot_id).copied().unwrap_or(0);
            let available = available_spots(slot.capacity, booked);
            SlotAvailability {
                slot_id: slot.slot_id,
                start_time: slot.start_time,
                end_time: slot.end_time,
                capacity: slot.capacity,
                booked,
                available,
                selectable: requested > 0 && available >= requested,
            }
        })
        .collect()
}

/// Mark every slot as not selectable. Used for dates that cannot be booked.
pub fn disable_all(slots: &mut [SlotAvailability]) {
    for slot in slots {
        slot.selectable = false;
    }
}

/// A calendar date is bookable unless it lies strictly before `today`.
pub fn is_date_bookable(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Reject a date in the past with a validation error.
pub fn ensure_date_bookable(date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if is_date_bookable(date, today) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "booking_date {date} is in the past"
        )))
    }
}

/// Reject a party that no longer fits into a slot.
pub fn ensure_slot_fits(capacity: i32, booked: i64, requested: i32) -> Result<(), CoreError> {
    let available = available_spots(capacity, booked);
    if available >= requested {
        Ok(())
    } else {
        Err(slot_full(available, requested))
    }
}

/// Raised when a party of `requested` does not fit into `available`.
pub fn slot_full(available: i32, requested: i32) -> CoreError {
    CoreError::SlotFull {
        available: available.max(0),
        requested,
    }
}

/// Party size must be between 1 and [`MAX_PARTICIPANTS_PER_BOOKING`].
pub fn validate_participant_count(requested: i32) -> Result<(), CoreError> {
    if (1..=MAX_PARTICIPANTS_PER_BOOKING).contains(&requested) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "participants must be between 1 and {MAX_PARTICIPANTS_PER_BOOKING}, got {requested}"
        )))
    }
}

/// Slot configuration check used by the experience editor.
pub fn validate_slot_window(
    start_time: NaiveTime,
    end_time: NaiveTime,
    capacity: i32,
) -> Result<(), CoreError> {
    if end_time <= start_time {
        return Err(CoreError::Validation(
            "end_time must be after start_time".to_string(),
        ));
    }
    if !(1..=MAX_SLOT_CAPACITY).contains(&capacity) {
        return Err(CoreError::Validation(format!(
            "capacity must be between 1 and {MAX_SLOT_CAPACITY}, got {capacity}"
        )));
    }
    Ok(())
}
