//! Repository for the `bookings` and `booking_participants` tables.

use bucketlist_core::availability::available_spots;
use bucketlist_core::booking::BookingStatus;
use bucketlist_core::types::DbId;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::booking::{
    Booking, BookingInsertOutcome, BookingListQuery, BookingParticipant, BookingWithParticipants,
    NewBooking, SlotBookedCount,
};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, reference, user_id, experience_id, activity_id, time_slot_id, \
                       booking_date, total_participants, status, subtotal_amount, \
                       discount_amount, total_amount, currency, coupon_id, contact_name, \
                       contact_email, contact_phone, is_offline, payment_order_id, payment_id, \
                       note, created_by, cancelled_at, created_at, updated_at";

const PARTICIPANT_COLUMNS: &str = "id, booking_id, name, email, phone_number, created_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Provides booking persistence and the capacity-checked insert.
pub struct BookingRepo;

impl BookingRepo {
    // -----------------------------------------------------------------------
    // Availability
    // -----------------------------------------------------------------------

    /// Sum of confirmed participants per slot of an activity on one date.
    ///
    /// Slots without confirmed bookings are absent from the result.
    pub async fn confirmed_participants_by_slot(
        pool: &PgPool,
        activity_id: DbId,
        booking_date: NaiveDate,
    ) -> Result<Vec<SlotBookedCount>, sqlx::Error> {
        sqlx::query_as::<_, SlotBookedCount>(
            "SELECT time_slot_id, SUM(total_participants)::BIGINT AS participants
             FROM bookings
             WHERE activity_id = $1 AND booking_date = $2 AND status = $3
             GROUP BY time_slot_id",
        )
        .bind(activity_id)
        .bind(booking_date)
        .bind(BookingStatus::Confirmed.as_str())
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Insert
    // -----------------------------------------------------------------------

    /// Insert a confirmed booking if the party still fits into the slot.
    ///
    /// The slot row is locked with `FOR UPDATE` for the duration of the
    /// transaction, so concurrent inserts for the same slot serialize and the
    /// capacity re-check sees every previously committed booking. When a
    /// coupon is attached its `used_count` is incremented in the same
    /// transaction, guarded by `usage_limit`.
    ///
    /// Returns `Err(RowNotFound)` if the slot does not belong to the activity.
    pub async fn create_confirmed(
        pool: &PgPool,
        input: &NewBooking,
    ) -> Result<BookingInsertOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (capacity,): (i32,) = sqlx::query_as(
            "SELECT capacity FROM time_slots WHERE id = $1 AND activity_id = $2 FOR UPDATE",
        )
        .bind(input.time_slot_id)
        .bind(input.activity_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

        let (booked,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total_participants), 0)::BIGINT
             FROM bookings
             WHERE time_slot_id = $1 AND booking_date = $2 AND status = $3",
        )
        .bind(input.time_slot_id)
        .bind(input.booking_date)
        .bind(BookingStatus::Confirmed.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let available = available_spots(capacity, booked);
        if available < input.total_participants {
            tracing::debug!(
                slot_id = input.time_slot_id,
                date = %input.booking_date,
                available,
                requested = input.total_participants,
                "Slot cannot fit party"
            );
            tx.rollback().await?;
            return Ok(BookingInsertOutcome::SlotFull { available });
        }

        if let Some(coupon_id) = input.coupon_id {
            let claimed = sqlx::query(
                "UPDATE coupons SET used_count = used_count + 1
                 WHERE id = $1 AND (usage_limit IS NULL OR used_count < usage_limit)",
            )
            .bind(coupon_id)
            .execute(&mut *tx)
            .await?;
            if claimed.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(BookingInsertOutcome::CouponExhausted);
            }
        }

        let query = format!(
            "INSERT INTO bookings
                (reference, user_id, experience_id, activity_id, time_slot_id, booking_date,
                 total_participants, status, subtotal_amount, discount_amount, total_amount,
                 currency, coupon_id, contact_name, contact_email, contact_phone, is_offline,
                 payment_order_id, payment_id, note, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                     $17, $18, $19, $20, $21)
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(&input.reference)
            .bind(input.user_id)
            .bind(input.experience_id)
            .bind(input.activity_id)
            .bind(input.time_slot_id)
            .bind(input.booking_date)
            .bind(input.total_participants)
            .bind(BookingStatus::Confirmed.as_str())
            .bind(input.subtotal_amount)
            .bind(input.discount_amount)
            .bind(input.total_amount)
            .bind(&input.currency)
            .bind(input.coupon_id)
            .bind(&input.contact.name)
            .bind(&input.contact.email)
            .bind(&input.contact.phone_number)
            .bind(input.is_offline)
            .bind(&input.payment_order_id)
            .bind(&input.payment_id)
            .bind(&input.note)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        let participants = Self::insert_participants(&mut tx, booking.id, input).await?;

        tx.commit().await?;
        Ok(BookingInsertOutcome::Created(BookingWithParticipants {
            booking,
            participants,
        }))
    }

    async fn insert_participants(
        tx: &mut Transaction<'_, Postgres>,
        booking_id: DbId,
        input: &NewBooking,
    ) -> Result<Vec<BookingParticipant>, sqlx::Error> {
        let query = format!(
            "INSERT INTO booking_participants (booking_id, name, email, phone_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {PARTICIPANT_COLUMNS}"
        );
        let mut rows = Vec::with_capacity(input.participants.len());
        for participant in &input.participants {
            let row = sqlx::query_as::<_, BookingParticipant>(&query)
                .bind(booking_id)
                .bind(&participant.name)
                .bind(&participant.email)
                .bind(&participant.phone_number)
                .fetch_one(&mut **tx)
                .await?;
            rows.push(row);
        }
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking by its public reference code.
    pub async fn find_by_reference(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE reference = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(reference)
            .fetch_optional(pool)
            .await
    }

    /// Participant records of a booking in insertion order.
    pub async fn list_participants(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<BookingParticipant>, sqlx::Error> {
        let query = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM booking_participants
             WHERE booking_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, BookingParticipant>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// Load a booking together with its participants.
    pub async fn find_with_participants(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingWithParticipants>, sqlx::Error> {
        let Some(booking) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let participants = Self::list_participants(pool, booking.id).await?;
        Ok(Some(BookingWithParticipants {
            booking,
            participants,
        }))
    }

    /// Bookings made by a customer, latest booking date first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &BookingListQuery,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        Self::list_filtered(pool, Some(user_id), None, params).await
    }

    /// Bookings on experiences owned by a vendor.
    pub async fn list_for_vendor(
        pool: &PgPool,
        vendor_id: DbId,
        params: &BookingListQuery,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        Self::list_filtered(pool, None, Some(vendor_id), params).await
    }

    /// Every booking, for admins.
    pub async fn list_all(
        pool: &PgPool,
        params: &BookingListQuery,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        Self::list_filtered(pool, None, None, params).await
    }

    async fn list_filtered(
        pool: &PgPool,
        user_id: Option<DbId>,
        vendor_id: Option<DbId>,
        params: &BookingListQuery,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::BIGINT IS NULL
                    OR experience_id IN (SELECT id FROM experiences WHERE vendor_id = $2))
               AND ($3::TEXT IS NULL OR status = $3)
               AND ($4::DATE IS NULL OR booking_date = $4)
               AND ($5::BIGINT IS NULL OR experience_id = $5)
             ORDER BY booking_date DESC, id DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(vendor_id)
            .bind(&params.status)
            .bind(params.booking_date)
            .bind(params.experience_id)
            .bind(clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Status changes
    // -----------------------------------------------------------------------

    /// Cancel a booking, releasing its spots.
    ///
    /// Returns `None` if the booking does not exist or is already cancelled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = $2, cancelled_at = NOW()
             WHERE id = $1 AND status <> $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(BookingStatus::Cancelled.as_str())
            .fetch_optional(pool)
            .await
    }
}
