//! Handlers for blog posts: public reading and admin CMS.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::error::CoreError;
use bucketlist_core::types::DbId;
use bucketlist_db::models::blog::{Blog, CreateBlog, UpdateBlog};
use bucketlist_db::repositories::BlogRepo;
use bucketlist_db::{clamp_limit, clamp_offset};

use super::destination::resolve_slug;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 12;
const MAX_PAGE_SIZE: i64 = 50;

/// GET /api/v1/blogs
pub async fn list_published(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Blog>>>> {
    let blogs = BlogRepo::list_published(
        &state.pool,
        clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: blogs }))
}

/// GET /api/v1/blogs/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Blog>> {
    let blog = BlogRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog post '{slug}' not found")))?;
    Ok(Json(blog))
}

/// GET /api/v1/admin/blogs
///
/// Drafts included.
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Blog>>>> {
    let blogs = BlogRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: blogs }))
}

/// GET /api/v1/admin/blogs/{id}
///
/// Drafts included, for the editor.
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Blog>> {
    let blog = BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(blog))
}

/// POST /api/v1/admin/blogs
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBlog>,
) -> AppResult<(StatusCode, Json<Blog>)> {
    if input.title.trim().is_empty() || input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title and content must not be empty".into(),
        )));
    }
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let blog = BlogRepo::create(&state.pool, admin.user_id, &slug, &input).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

/// PUT /api/v1/admin/blogs/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateBlog>,
) -> AppResult<Json<Blog>> {
    if let Some(slug) = input.slug.take() {
        input.slug = Some(resolve_slug(Some(&slug), "")?);
    }
    let blog = BlogRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(blog))
}

/// DELETE /api/v1/admin/blogs/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BlogRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Blog", id })
}
