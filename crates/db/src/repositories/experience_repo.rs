//! Repository for the `experiences` table.

use bucketlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::experience::{
    CreateExperience, Experience, ExperienceListQuery, UpdateExperience,
};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, destination_id, vendor_id, title, description, location, category, \
                       duration, image_url, price, currency, is_active, created_at, updated_at";

const DEFAULT_LIMIT: i64 = 24;
const MAX_LIMIT: i64 = 100;

/// Provides CRUD operations for experiences.
pub struct ExperienceRepo;

impl ExperienceRepo {
    /// Insert an experience owned by `vendor_id`.
    pub async fn create(
        pool: &PgPool,
        vendor_id: DbId,
        input: &CreateExperience,
    ) -> Result<Experience, sqlx::Error> {
        let query = format!(
            "INSERT INTO experiences
                (destination_id, vendor_id, title, description, location, category,
                 duration, image_url, price, currency)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 'INR'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Experience>(&query)
            .bind(input.destination_id)
            .bind(vendor_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.duration)
            .bind(&input.image_url)
            .bind(input.price)
            .bind(&input.currency)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Experience>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experiences WHERE id = $1");
        sqlx::query_as::<_, Experience>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active experiences matching the optional filters, newest first.
    pub async fn list_active(
        pool: &PgPool,
        params: &ExperienceListQuery,
    ) -> Result<Vec<Experience>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM experiences
             WHERE is_active = true
               AND ($1::BIGINT IS NULL OR destination_id = $1)
               AND ($2::TEXT IS NULL OR category = $2)
               AND ($3::TEXT IS NULL OR title ILIKE '%' || $3 || '%'
                                     OR location ILIKE '%' || $3 || '%')
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Experience>(&query)
            .bind(params.destination_id)
            .bind(&params.category)
            .bind(params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()))
            .bind(clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// List every experience owned by a vendor, including inactive ones.
    pub async fn list_by_vendor(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<Experience>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM experiences
             WHERE vendor_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Experience>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// Update an experience. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExperience,
    ) -> Result<Option<Experience>, sqlx::Error> {
        let query = format!(
            "UPDATE experiences SET
                destination_id = COALESCE($2, destination_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                category = COALESCE($6, category),
                duration = COALESCE($7, duration),
                image_url = COALESCE($8, image_url),
                price = COALESCE($9, price),
                currency = COALESCE($10, currency),
                is_active = COALESCE($11, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Experience>(&query)
            .bind(id)
            .bind(input.destination_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.duration)
            .bind(&input.image_url)
            .bind(input.price)
            .bind(&input.currency)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete: hide the experience from the catalogue.
    ///
    /// Rows are never hard-deleted because bookings reference them.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE experiences SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
