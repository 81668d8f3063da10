//! Handler for slot availability of an activity on a date.

use axum::extract::{Path, Query, State};
use axum::Json;
use bucketlist_core::availability::{
    compute_slot_availability, disable_all, is_date_bookable, validate_participant_count,
    SlotAvailability, SlotBooking, SlotCapacity,
};
use bucketlist_core::error::CoreError;
use bucketlist_core::types::DbId;
use bucketlist_db::repositories::{ActivityRepo, BookingRepo, TimeSlotRepo};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::AvailabilityParams;
use crate::state::AppState;

/// Availability of every slot of an activity for one date and party size.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub activity_id: DbId,
    pub date: NaiveDate,
    pub participants: i32,
    /// `false` when `date` is before today; every slot is then unselectable.
    pub date_bookable: bool,
    pub slots: Vec<SlotAvailability>,
}

/// GET /api/v1/activities/{id}/availability?date=YYYY-MM-DD&participants=N
///
/// Recomputed from confirmed bookings on every call.
pub async fn get_availability(
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<Json<AvailabilityResponse>> {
    ActivityRepo::find_by_id(&state.pool, activity_id)
        .await?
        .filter(|a| a.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }))?;

    let participants = params.participants.unwrap_or(1);
    validate_participant_count(participants)?;

    let slots = TimeSlotRepo::list_by_activity(&state.pool, activity_id).await?;
    let capacities: Vec<SlotCapacity> = slots.iter().map(SlotCapacity::from).collect();

    let bookings: Vec<SlotBooking> =
        BookingRepo::confirmed_participants_by_slot(&state.pool, activity_id, params.date)
            .await?
            .into_iter()
            .map(|row| SlotBooking {
                slot_id: row.time_slot_id,
                participants: row.participants,
            })
            .collect();

    let mut availability = compute_slot_availability(&capacities, &bookings, participants);
    let date_bookable = is_date_bookable(params.date, state.config.today());
    if !date_bookable {
        disable_all(&mut availability);
    }

    tracing::debug!(
        activity_id,
        date = %params.date,
        participants,
        date_bookable,
        slots = availability.len(),
        "Computed slot availability"
    );

    Ok(Json(AvailabilityResponse {
        activity_id,
        date: params.date,
        participants,
        date_bookable,
        slots: availability,
    }))
}
