//! Handlers for the `/experiences` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::error::CoreError;
use bucketlist_core::pricing::validate_price;
use bucketlist_core::types::DbId;
use bucketlist_db::models::activity::Activity;
use bucketlist_db::models::experience::{
    CreateExperience, Experience, ExperienceListQuery, UpdateExperience,
};
use bucketlist_db::repositories::{ActivityRepo, ExperienceRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireVendor;
use crate::response::DataResponse;
use crate::state::AppState;

/// An experience with its bookable activities.
#[derive(Debug, Serialize)]
pub struct ExperienceDetail {
    #[serde(flatten)]
    pub experience: Experience,
    pub activities: Vec<Activity>,
}

/// GET /api/v1/experiences
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ExperienceListQuery>,
) -> AppResult<Json<DataResponse<Vec<Experience>>>> {
    let experiences = ExperienceRepo::list_active(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: experiences }))
}

/// GET /api/v1/experiences/{id}
///
/// Inactive experiences are hidden from the public catalogue.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ExperienceDetail>> {
    let experience = ExperienceRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|e| e.is_active)
        .ok_or(not_found(id))?;
    let activities = ActivityRepo::list_by_experience(&state.pool, id, true).await?;
    Ok(Json(ExperienceDetail {
        experience,
        activities,
    }))
}

/// POST /api/v1/experiences
///
/// The caller becomes the owning vendor.
pub async fn create(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Json(input): Json<CreateExperience>,
) -> AppResult<(StatusCode, Json<Experience>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    ensure_price("price", input.price)?;

    let experience = ExperienceRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(
        experience_id = experience.id,
        vendor_id = user.user_id,
        "Experience created"
    );
    Ok((StatusCode::CREATED, Json(experience)))
}

/// PUT /api/v1/experiences/{id}
pub async fn update(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExperience>,
) -> AppResult<Json<Experience>> {
    load_owned_experience(&state, &user, id).await?;
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    if let Some(price) = input.price {
        ensure_price("price", price)?;
    }

    let experience = ExperienceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(experience))
}

/// DELETE /api/v1/experiences/{id}
///
/// Deactivates rather than deletes, so existing bookings keep their experience.
pub async fn deactivate(
    RequireVendor(user): RequireVendor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned_experience(&state, &user, id).await?;
    if ExperienceRepo::deactivate(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an experience (active or not) the caller owns, or any one for admins.
pub(crate) async fn load_owned_experience(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Experience> {
    let experience = ExperienceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    user.ensure_owner_or_admin(experience.vendor_id, "experience")?;
    Ok(experience)
}

pub(crate) fn ensure_price(field: &str, amount: i64) -> AppResult<()> {
    validate_price(field, amount)?;
    Ok(())
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Experience",
        id,
    })
}
