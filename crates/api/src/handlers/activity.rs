//! Handlers for activities, the priced packages of an experience.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::error::CoreError;
use bucketlist_core::types::DbId;
use bucketlist_db::models::activity::{Activity, CreateActivity, UpdateActivity};
use bucketlist_db::repositories::{ActivityRepo, ExperienceRepo};

use super::experience::{ensure_price, load_owned_experience};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireVendor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/experiences/{experience_id}/activities
pub async fn list_by_experience(
    State(state): State<AppState>,
    Path(experience_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Activity>>>> {
    ExperienceRepo::find_by_id(&state.pool, experience_id)
        .await?
        .filter(|e| e.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Experience",
            id: experience_id,
        }))?;
    let activities = ActivityRepo::list_by_experience(&state.pool, experience_id, true).await?;
    Ok(Json(DataResponse { data: activities }))
}

/// POST /api/v1/experiences/{experience_id}/activities
pub async fn create(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Path(experience_id): Path<DbId>,
    Json(input): Json<CreateActivity>,
) -> AppResult<(StatusCode, Json<Activity>)> {
    load_owned_experience(&state, &user, experience_id).await?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    ensure_price("price", input.price)?;
    if let Some(discounted) = input.discounted_price {
        ensure_price("discounted_price", discounted)?;
    }

    let activity = ActivityRepo::create(&state.pool, experience_id, &input).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// GET /api/v1/activities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Activity>> {
    let activity = ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|a| a.is_active)
        .ok_or(not_found(id))?;
    Ok(Json(activity))
}

/// PUT /api/v1/activities/{id}
pub async fn update(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActivity>,
) -> AppResult<Json<Activity>> {
    load_owned_activity(&state, &user, id).await?;
    if let Some(price) = input.price {
        ensure_price("price", price)?;
    }
    if let Some(discounted) = input.discounted_price {
        ensure_price("discounted_price", discounted)?;
    }
    let activity = ActivityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(activity))
}

/// DELETE /api/v1/activities/{id}
pub async fn deactivate(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned_activity(&state, &user, id).await?;
    if ActivityRepo::deactivate(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// Load an activity whose experience the caller owns (or any, for admins).
pub(crate) async fn load_owned_activity(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Activity> {
    let activity = ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    load_owned_experience(state, user, activity.experience_id).await?;
    Ok(activity)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Activity",
        id,
    })
}
