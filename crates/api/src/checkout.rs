//! Booking steps shared by the online checkout and the offline booking tool.
//!
//! Both flows resolve the same selection (experience, activity, date, slot,
//! party size), pre-check capacity, price it and finally insert a confirmed
//! booking through the capacity-locked repository call. Only the payment
//! handling around these steps differs.

use bucketlist_core::availability::{ensure_slot_fits, slot_full};
use bucketlist_core::booking::{BookingDraft, BookingRequest};
use bucketlist_core::coupon::normalize_code;
use bucketlist_core::error::CoreError;
use bucketlist_core::participant::{describe_errors, validate_participants, ParticipantDetails};
use bucketlist_core::pricing::{quote, PriceQuote};
use bucketlist_core::types::DbId;
use bucketlist_db::models::activity::Activity;
use bucketlist_db::models::booking::{BookingInsertOutcome, BookingWithParticipants, NewBooking};
use bucketlist_db::models::coupon::Coupon;
use bucketlist_db::models::experience::Experience;
use bucketlist_db::models::time_slot::TimeSlot;
use bucketlist_db::repositories::{
    ActivityRepo, BookingRepo, CouponRepo, ExperienceRepo, TimeSlotRepo,
};
use bucketlist_events::{BookingConfirmed, BookingEvent};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The slot a customer (or vendor) picked in the booking widget.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BookingSelection {
    pub experience_id: DbId,
    pub activity_id: DbId,
    pub booking_date: NaiveDate,
    pub time_slot_id: DbId,
    pub participants: i32,
}

impl BookingSelection {
    fn to_draft(self) -> BookingDraft {
        let mut draft = BookingDraft::new(self.experience_id);
        draft.select_activity(self.activity_id);
        draft.select_date(self.booking_date);
        draft.select_slot(self.time_slot_id);
        draft.set_participants(self.participants);
        draft
    }
}

/// A validated selection with its catalogue rows loaded.
#[derive(Debug, Clone)]
pub struct ResolvedSelection {
    pub request: BookingRequest,
    pub experience: Experience,
    pub activity: Activity,
    pub slot: TimeSlot,
}

/// Validate a selection against today's date and the catalogue.
///
/// The activity must belong to the experience, the slot to the activity,
/// and both the experience and the activity must be active.
pub async fn resolve_selection(
    state: &AppState,
    selection: BookingSelection,
) -> AppResult<ResolvedSelection> {
    let request = selection.to_draft().into_request(state.config.today())?;

    let activity = ActivityRepo::find_by_id(&state.pool, request.activity_id)
        .await?
        .filter(|a| a.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: request.activity_id,
        }))?;
    if activity.experience_id != request.experience_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "activity_id {} does not belong to experience {}",
            activity.id, request.experience_id
        ))));
    }

    let experience = ExperienceRepo::find_by_id(&state.pool, request.experience_id)
        .await?
        .filter(|e| e.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Experience",
            id: request.experience_id,
        }))?;

    let slot = TimeSlotRepo::find_by_id(&state.pool, request.time_slot_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TimeSlot",
            id: request.time_slot_id,
        }))?;
    if slot.activity_id != activity.id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "time_slot_id {} does not belong to activity {}",
            slot.id, activity.id
        ))));
    }

    Ok(ResolvedSelection {
        request,
        experience,
        activity,
        slot,
    })
}

/// Reject the selection early when the party no longer fits.
///
/// The authoritative check happens again under the slot lock at insert time.
pub async fn ensure_capacity(state: &AppState, resolved: &ResolvedSelection) -> AppResult<()> {
    let counts = BookingRepo::confirmed_participants_by_slot(
        &state.pool,
        resolved.activity.id,
        resolved.request.booking_date,
    )
    .await?;
    let booked = counts
        .iter()
        .find(|c| c.time_slot_id == resolved.slot.id)
        .map_or(0, |c| c.participants);
    ensure_slot_fits(resolved.slot.capacity, booked, resolved.request.participants)?;
    Ok(())
}

/// Look up a user-entered coupon code for an experience.
///
/// Blank codes mean "no coupon". Unknown codes and coupons scoped to another
/// experience are validation errors.
pub async fn resolve_coupon(
    state: &AppState,
    code: Option<&str>,
    experience_id: DbId,
) -> AppResult<Option<Coupon>> {
    let Some(code) = code.map(normalize_code).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    let coupon = CouponRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Coupon {code} is not valid")))
        })?;
    if !coupon.applies_to(experience_id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Coupon {code} does not apply to this experience"
        ))));
    }
    Ok(Some(coupon))
}

/// Price the selection at the activity's effective unit price.
pub fn price(resolved: &ResolvedSelection, coupon: Option<&Coupon>) -> AppResult<PriceQuote> {
    let terms = coupon.map(Coupon::terms).transpose()?;
    let quote = quote(
        resolved.activity.unit_price(),
        resolved.request.participants,
        terms.as_ref(),
        Utc::now(),
    )?;
    Ok(quote)
}

/// Online checkout needs something to charge.
pub fn ensure_payable(quote: &PriceQuote) -> AppResult<()> {
    if quote.total <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Online checkout requires a positive total".into(),
        )));
    }
    Ok(())
}

/// Validate the lead contact and the participant list for a party.
///
/// An empty participant list defaults to the contact alone. Both come back
/// normalized.
pub fn collect_participants(
    contact: &ParticipantDetails,
    participants: &[ParticipantDetails],
    party_size: i32,
) -> AppResult<(ParticipantDetails, Vec<ParticipantDetails>)> {
    contact
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(describe_errors("contact.", &e))))?;
    let contact = contact.normalized();

    let participants = if participants.is_empty() {
        vec![contact.clone()]
    } else {
        participants.to_vec()
    };
    validate_participants(&participants, party_size)?;

    Ok((
        contact,
        participants.iter().map(ParticipantDetails::normalized).collect(),
    ))
}

/// Insert a confirmed booking under the slot lock and announce it.
pub async fn confirm_booking(
    state: &AppState,
    resolved: &ResolvedSelection,
    new_booking: NewBooking,
    actor: DbId,
) -> AppResult<BookingWithParticipants> {
    let requested = new_booking.total_participants;
    let created = match BookingRepo::create_confirmed(&state.pool, &new_booking).await? {
        BookingInsertOutcome::Created(created) => created,
        BookingInsertOutcome::SlotFull { available } => {
            return Err(AppError::Core(slot_full(available, requested)));
        }
        BookingInsertOutcome::CouponExhausted => {
            return Err(AppError::Core(CoreError::Validation(
                "Coupon has reached its usage limit".to_string(),
            )));
        }
    };

    let booking = &created.booking;
    tracing::info!(
        booking_id = booking.id,
        reference = %booking.reference,
        slot_id = booking.time_slot_id,
        date = %booking.booking_date,
        participants = booking.total_participants,
        is_offline = booking.is_offline,
        "Booking confirmed",
    );

    let event = BookingConfirmed {
        booking_id: booking.id,
        reference: booking.reference.clone(),
        contact_name: booking.contact_name.clone(),
        contact_email: booking.contact_email.clone(),
        experience_title: resolved.experience.title.clone(),
        activity_name: resolved.activity.name.clone(),
        booking_date: booking.booking_date,
        start_time: resolved.slot.start_time,
        end_time: resolved.slot.end_time,
        participants: booking.total_participants,
        total_amount: booking.total_amount,
        currency: booking.currency.clone(),
        is_offline: booking.is_offline,
    };
    state
        .event_bus
        .publish(BookingEvent::Confirmed(event), Some(actor));

    Ok(created)
}
