//! Booking flow state and lifecycle.
//!
//! [`BookingDraft`] models the multi-step booking widget: pick an activity,
//! a date, a time slot and a party size, in any order. It carries no
//! persistence; once every step is filled, [`BookingDraft::into_request`]
//! turns it into a [`BookingRequest`] that the API layer can price and
//! persist.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::availability::{ensure_date_bookable, validate_participant_count, SlotAvailability};
use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a booking, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown booking status '{other}'"
            ))),
        }
    }

    /// Only confirmed bookings consume slot capacity.
    pub fn consumes_capacity(self) -> bool {
        self == Self::Confirmed
    }

    /// Pending -> Confirmed | Cancelled, Confirmed -> Cancelled.
    pub fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    pub fn validate_transition(self, to: Self) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: self.as_str(),
                to: to.as_str(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// In-progress selection of the booking widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub experience_id: Option<DbId>,
    pub activity_id: Option<DbId>,
    pub booking_date: Option<NaiveDate>,
    pub time_slot_id: Option<DbId>,
    pub participants: i32,
}

/// A fully specified booking selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub experience_id: DbId,
    pub activity_id: DbId,
    pub booking_date: NaiveDate,
    pub time_slot_id: DbId,
    pub participants: i32,
}

impl BookingDraft {
    pub fn new(experience_id: DbId) -> Self {
        Self {
            experience_id: Some(experience_id),
            participants: 1,
            ..Self::default()
        }
    }

    /// Choose an activity. Switching to a different activity clears the slot,
    /// since slots belong to exactly one activity.
    pub fn select_activity(&mut self, activity_id: DbId) {
        if self.activity_id != Some(activity_id) {
            self.time_slot_id = None;
        }
        self.activity_id = Some(activity_id);
    }

    /// Choose a date. A different date clears the slot because availability
    /// is per date.
    pub fn select_date(&mut self, date: NaiveDate) {
        if self.booking_date != Some(date) {
            self.time_slot_id = None;
        }
        self.booking_date = Some(date);
    }

    pub fn select_slot(&mut self, time_slot_id: DbId) {
        self.time_slot_id = Some(time_slot_id);
    }

    /// Change the party size. The selected slot is kept; whether it still
    /// fits is answered by [`selected_slot_fits`](Self::selected_slot_fits).
    pub fn set_participants(&mut self, participants: i32) {
        self.participants = participants;
    }

    /// Whether the currently selected slot is selectable in `availability`.
    pub fn selected_slot_fits(&self, availability: &[SlotAvailability]) -> bool {
        let Some(slot_id) = self.time_slot_id else {
            return false;
        };
        availability
            .iter()
            .find(|slot| slot.slot_id == slot_id)
            .is_some_and(|slot| slot.available >= self.participants && self.participants > 0)
    }

    /// Validate that every step is filled and produce a [`BookingRequest`].
    pub fn into_request(self, today: NaiveDate) -> Result<BookingRequest, CoreError> {
        let experience_id = self.experience_id.ok_or_else(|| missing("experience_id"))?;
        let activity_id = self.activity_id.ok_or_else(|| missing("activity_id"))?;
        let booking_date = self.booking_date.ok_or_else(|| missing("booking_date"))?;
        let time_slot_id = self.time_slot_id.ok_or_else(|| missing("time_slot_id"))?;

        ensure_date_bookable(booking_date, today)?;
        validate_participant_count(self.participants)?;

        Ok(BookingRequest {
            experience_id,
            activity_id,
            booking_date,
            time_slot_id,
            participants: self.participants,
        })
    }
}

fn missing(field: &str) -> CoreError {
    CoreError::Validation(format!("{field} is required"))
}

// ---------------------------------------------------------------------------
// Reference codes
// ---------------------------------------------------------------------------

/// Prefix of every booking reference code.
pub const BOOKING_REFERENCE_PREFIX: &str = "BKL-";

/// Number of random characters after the prefix.
pub const BOOKING_REFERENCE_LEN: usize = 8;

/// Unambiguous characters (no 0/O, 1/I).
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate a human-friendly booking reference such as `BKL-7QK2MZP4`.
pub fn generate_booking_reference() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..BOOKING_REFERENCE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..REFERENCE_ALPHABET.len());
            REFERENCE_ALPHABET[idx] as char
        })
        .collect();
    format!("{BOOKING_REFERENCE_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveTime;

    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn availability(slot_id: DbId, available: i32) -> SlotAvailability {
        SlotAvailability {
            slot_id,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            capacity: 10,
            booked: i64::from(10 - available),
            available,
            selectable: true,
        }
    }

    fn full_draft() -> BookingDraft {
        let mut draft = BookingDraft::new(1);
        draft.select_activity(2);
        draft.select_date(date(25));
        draft.select_slot(3);
        draft.set_participants(4);
        draft
    }

    // -----------------------------------------------------------------------
    // Status transitions
    // -----------------------------------------------------------------------

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(BookingStatus::parse("refunded").is_err());
    }

    #[test]
    fn only_confirmed_consumes_capacity() {
        assert!(BookingStatus::Confirmed.consumes_capacity());
        assert!(!BookingStatus::Pending.consumes_capacity());
        assert!(!BookingStatus::Cancelled.consumes_capacity());
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(!BookingStatus::Cancelled.can_transition(BookingStatus::Confirmed));
        assert!(!BookingStatus::Cancelled.can_transition(BookingStatus::Pending));
        assert!(BookingStatus::Confirmed.can_transition(BookingStatus::Cancelled));
        assert_matches!(
            BookingStatus::Cancelled.validate_transition(BookingStatus::Confirmed),
            Err(CoreError::InvalidTransition {
                from: "cancelled",
                to: "confirmed"
            })
        );
    }

    // -----------------------------------------------------------------------
    // Draft selection
    // -----------------------------------------------------------------------

    #[test]
    fn selecting_new_activity_clears_slot() {
        let mut draft = full_draft();
        draft.select_activity(9);
        assert_eq!(draft.activity_id, Some(9));
        assert_eq!(draft.time_slot_id, None);
    }

    #[test]
    fn reselecting_same_activity_keeps_slot() {
        let mut draft = full_draft();
        draft.select_activity(2);
        assert_eq!(draft.time_slot_id, Some(3));
    }

    #[test]
    fn selecting_new_date_clears_slot() {
        let mut draft = full_draft();
        draft.select_date(date(26));
        assert_eq!(draft.time_slot_id, None);
    }

    #[test]
    fn changing_participants_keeps_slot_but_rechecks_fit() {
        let mut draft = full_draft();
        let slots = [availability(3, 4)];
        assert!(draft.selected_slot_fits(&slots));

        draft.set_participants(5);
        assert_eq!(draft.time_slot_id, Some(3));
        assert!(!draft.selected_slot_fits(&slots));
    }

    #[test]
    fn selected_slot_missing_from_availability_does_not_fit() {
        let draft = full_draft();
        assert!(!draft.selected_slot_fits(&[availability(7, 10)]));
    }

    // -----------------------------------------------------------------------
    // into_request
    // -----------------------------------------------------------------------

    #[test]
    fn complete_draft_becomes_request() {
        let request = full_draft().into_request(date(19)).unwrap();
        assert_eq!(
            request,
            BookingRequest {
                experience_id: 1,
                activity_id: 2,
                booking_date: date(25),
                time_slot_id: 3,
                participants: 4,
            }
        );
    }

    #[test]
    fn incomplete_draft_names_missing_field() {
        let mut draft = BookingDraft::new(1);
        draft.select_activity(2);
        draft.select_date(date(25));
        let err = draft.into_request(date(19)).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("time_slot_id"));
    }

    #[test]
    fn past_date_is_rejected() {
        let err = full_draft().into_request(date(26)).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("in the past"));
    }

    // -----------------------------------------------------------------------
    // Reference codes
    // -----------------------------------------------------------------------

    #[test]
    fn reference_has_prefix_and_alphabet() {
        let reference = generate_booking_reference();
        assert!(reference.starts_with(BOOKING_REFERENCE_PREFIX));
        let suffix = &reference[BOOKING_REFERENCE_PREFIX.len()..];
        assert_eq!(suffix.len(), BOOKING_REFERENCE_LEN);
        assert!(suffix.bytes().all(|b| REFERENCE_ALPHABET.contains(&b)));
    }
}
