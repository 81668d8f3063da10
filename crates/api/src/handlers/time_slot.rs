//! Handlers for the daily time slots of an activity.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::availability::validate_slot_window;
use bucketlist_core::error::CoreError;
use bucketlist_core::types::DbId;
use bucketlist_db::models::time_slot::{CreateTimeSlot, TimeSlot, UpdateTimeSlot};
use bucketlist_db::repositories::{ActivityRepo, TimeSlotRepo};

use super::activity::load_owned_activity;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireVendor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activities/{activity_id}/time-slots
pub async fn list_by_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TimeSlot>>>> {
    ActivityRepo::find_by_id(&state.pool, activity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }))?;
    let slots = TimeSlotRepo::list_by_activity(&state.pool, activity_id).await?;
    Ok(Json(DataResponse { data: slots }))
}

/// POST /api/v1/activities/{activity_id}/time-slots
pub async fn create(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
    Json(input): Json<CreateTimeSlot>,
) -> AppResult<(StatusCode, Json<TimeSlot>)> {
    load_owned_activity(&state, &user, activity_id).await?;
    validate_slot_window(input.start_time, input.end_time, input.capacity)?;
    let slot = TimeSlotRepo::create(&state.pool, activity_id, &input).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// PUT /api/v1/time-slots/{id}
///
/// The merged window (existing values overlaid with the patch) is validated.
/// Lowering capacity below what is already booked is allowed; the slot then
/// simply shows no spots left.
pub async fn update(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimeSlot>,
) -> AppResult<Json<TimeSlot>> {
    let existing = TimeSlotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    load_owned_activity(&state, &user, existing.activity_id).await?;

    validate_slot_window(
        input.start_time.unwrap_or(existing.start_time),
        input.end_time.unwrap_or(existing.end_time),
        input.capacity.unwrap_or(existing.capacity),
    )?;

    let slot = TimeSlotRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(slot))
}

/// DELETE /api/v1/time-slots/{id}
///
/// Slots referenced by bookings cannot be deleted (400 via the foreign key).
pub async fn delete(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = TimeSlotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    load_owned_activity(&state, &user, existing.activity_id).await?;

    if TimeSlotRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "TimeSlot",
        id,
    })
}
