//! Repository for the `time_slots` table.

use bucketlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::time_slot::{CreateTimeSlot, TimeSlot, UpdateTimeSlot};

const COLUMNS: &str = "id, activity_id, start_time, end_time, capacity, created_at, updated_at";

/// Provides CRUD operations for time slots.
pub struct TimeSlotRepo;

impl TimeSlotRepo {
    pub async fn create(
        pool: &PgPool,
        activity_id: DbId,
        input: &CreateTimeSlot,
    ) -> Result<TimeSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_slots (activity_id, start_time, end_time, capacity)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(activity_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_slots WHERE id = $1");
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the slots of an activity ordered by start time.
    pub async fn list_by_activity(
        pool: &PgPool,
        activity_id: DbId,
    ) -> Result<Vec<TimeSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_slots
             WHERE activity_id = $1
             ORDER BY start_time ASC"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(activity_id)
            .fetch_all(pool)
            .await
    }

    /// Update a time slot. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTimeSlot,
    ) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE time_slots SET
                start_time = COALESCE($2, start_time),
                end_time = COALESCE($3, end_time),
                capacity = COALESCE($4, capacity)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a slot. Fails with a foreign-key violation while bookings
    /// reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_slots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
