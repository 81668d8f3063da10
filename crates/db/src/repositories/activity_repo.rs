//! Repository for the `activities` table.

use bucketlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, CreateActivity, UpdateActivity};

const COLUMNS: &str = "id, experience_id, name, description, price, discounted_price, currency, \
                       is_active, created_at, updated_at";

/// Provides CRUD operations for activities.
pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn create(
        pool: &PgPool,
        experience_id: DbId,
        input: &CreateActivity,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities
                (experience_id, name, description, price, discounted_price, currency)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'INR'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(experience_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.discounted_price)
            .bind(&input.currency)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List activities of an experience in creation order.
    ///
    /// With `active_only`, inactive activities are left out (public catalogue).
    pub async fn list_by_experience(
        pool: &PgPool,
        experience_id: DbId,
        active_only: bool,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities
             WHERE experience_id = $1 AND ($2 = false OR is_active = true)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(experience_id)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update an activity. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActivity,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                discounted_price = COALESCE($5, discounted_price),
                currency = COALESCE($6, currency),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.discounted_price)
            .bind(&input.currency)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an activity; existing bookings keep referencing it.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE activities SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
