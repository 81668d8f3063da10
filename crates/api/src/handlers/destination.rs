//! Handlers for the `/destinations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::error::CoreError;
use bucketlist_core::slug::slugify;
use bucketlist_core::types::DbId;
use bucketlist_db::models::destination::{CreateDestination, Destination, UpdateDestination};
use bucketlist_db::models::experience::{Experience, ExperienceListQuery};
use bucketlist_db::repositories::{DestinationRepo, ExperienceRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Most experiences embedded in a destination page.
const DESTINATION_EXPERIENCE_LIMIT: i64 = 100;

/// A destination with its active experiences.
#[derive(Debug, Serialize)]
pub struct DestinationDetail {
    #[serde(flatten)]
    pub destination: Destination,
    pub experiences: Vec<Experience>,
}

/// GET /api/v1/destinations
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Destination>>>> {
    let destinations = DestinationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: destinations }))
}

/// GET /api/v1/destinations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DestinationDetail>> {
    let destination = DestinationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Destination",
            id,
        }))?;
    Ok(Json(with_experiences(&state, destination).await?))
}

/// GET /api/v1/destinations/by-slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DestinationDetail>> {
    let destination = DestinationRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Destination '{slug}' not found")))?;
    Ok(Json(with_experiences(&state, destination).await?))
}

/// POST /api/v1/admin/destinations
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateDestination>,
) -> AppResult<(StatusCode, Json<Destination>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;
    let destination = DestinationRepo::create(&state.pool, &input, &slug).await?;
    Ok((StatusCode::CREATED, Json(destination)))
}

/// PUT /api/v1/admin/destinations/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateDestination>,
) -> AppResult<Json<Destination>> {
    if let Some(slug) = input.slug.take() {
        input.slug = Some(resolve_slug(Some(&slug), "")?);
    }
    let destination = DestinationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Destination",
            id,
        }))?;
    Ok(Json(destination))
}

/// DELETE /api/v1/admin/destinations/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DestinationRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Destination",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn with_experiences(
    state: &AppState,
    destination: Destination,
) -> AppResult<DestinationDetail> {
    let experiences = ExperienceRepo::list_active(
        &state.pool,
        &ExperienceListQuery {
            destination_id: Some(destination.id),
            limit: Some(DESTINATION_EXPERIENCE_LIMIT),
            ..ExperienceListQuery::default()
        },
    )
    .await?;
    Ok(DestinationDetail {
        destination,
        experiences,
    })
}

/// Slugify an explicit slug, or derive one from `fallback`.
pub(crate) fn resolve_slug(explicit: Option<&str>, fallback: &str) -> AppResult<String> {
    let slug = slugify(explicit.unwrap_or(fallback));
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "slug must contain at least one letter or digit".into(),
        )));
    }
    Ok(slug)
}
