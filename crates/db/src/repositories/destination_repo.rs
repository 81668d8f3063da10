//! Repository for the `destinations` table.

use bucketlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::destination::{CreateDestination, Destination, UpdateDestination};

const COLUMNS: &str = "id, name, slug, description, country, image_url, created_at, updated_at";

/// Provides CRUD operations for destinations.
pub struct DestinationRepo;

impl DestinationRepo {
    /// Insert a destination. `slug` must already be resolved by the caller.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDestination,
        slug: &str,
    ) -> Result<Destination, sqlx::Error> {
        let query = format!(
            "INSERT INTO destinations (name, slug, description, country, image_url)
             VALUES ($1, $2, $3, COALESCE($4, 'India'), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.country)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations WHERE id = $1");
        sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations WHERE slug = $1");
        sqlx::query_as::<_, Destination>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all destinations alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations ORDER BY name ASC");
        sqlx::query_as::<_, Destination>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a destination. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDestination,
    ) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!(
            "UPDATE destinations SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                country = COALESCE($5, country),
                image_url = COALESCE($6, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.country)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a destination. Experiences keep existing with no destination.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
