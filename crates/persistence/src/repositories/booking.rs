//! Booking repository for database operations.
//!
//! Bookings are written exactly as supplied. Nothing here checks whether a
//! room is already booked for an overlapping window.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{BookingDetailsEntity, BookingEntity};
use crate::metrics::QueryTimer;

/// Filters and keyset position for listing bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingListFilter {
    pub user_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub status: Option<String>,
    /// `(created_at, id)` of the last row of the previous page.
    pub after: Option<(DateTime<Utc>, Uuid)>,
    pub limit: i64,
}

/// Repository for booking-related database operations.
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new booking.
    ///
    /// Fails with a foreign key violation if the guest or room does not exist.
    pub async fn create(
        &self,
        user_id: Uuid,
        room_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        status: &str,
        total_amount: Decimal,
    ) -> Result<BookingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_booking");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            INSERT INTO bookings (user_id, room_id, check_in, check_out, status, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .bind(status)
        .bind(total_amount)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find booking by ID.
    pub async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_booking_by_id");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            SELECT * FROM bookings WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find booking by ID together with the guest and room it references.
    pub async fn find_details_by_id(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingDetailsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_booking_details_by_id");
        let result = sqlx::query_as::<_, BookingDetailsEntity>(
            r#"
            SELECT
                b.id, b.user_id, b.room_id, b.check_in, b.check_out,
                b.status, b.total_amount, b.created_at, b.updated_at,
                u.email AS user_email,
                u.full_name AS user_full_name,
                r.number AS room_number,
                r.room_type AS room_type
            FROM bookings b
            JOIN users u ON u.id = b.user_id
            JOIN rooms r ON r.id = b.room_id
            WHERE b.id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All bookings owned by a guest, ordered by check-in.
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_bookings_by_user");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            SELECT * FROM bookings
            WHERE user_id = $1
            ORDER BY check_in, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All bookings of a room, ordered by check-in.
    pub async fn find_by_room_id(&self, room_id: Uuid) -> Result<Vec<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_bookings_by_room");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            SELECT * FROM bookings
            WHERE room_id = $1
            ORDER BY check_in, id
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List bookings newest first, one page at a time.
    pub async fn list(&self, filter: &BookingListFilter) -> Result<Vec<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_bookings");
        let (after_created_at, after_id) = match filter.after {
            Some((created_at, id)) => (Some(created_at), Some(id)),
            None => (None, None),
        };

        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::UUID IS NULL OR user_id = $1)
              AND ($2::UUID IS NULL OR room_id = $2)
              AND ($3::TEXT IS NULL OR status = $3)
              AND ($4::TIMESTAMPTZ IS NULL OR (created_at, id) < ($4, $5::UUID))
            ORDER BY created_at DESC, id DESC
            LIMIT $6
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.room_id)
        .bind(filter.status.as_deref())
        .bind(after_created_at)
        .bind(after_id)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a booking (partial update).
    /// Only provided fields are updated; None values are preserved.
    pub async fn update(
        &self,
        booking_id: Uuid,
        check_in: Option<DateTime<Utc>>,
        check_out: Option<DateTime<Utc>>,
        status: Option<&str>,
        total_amount: Option<Decimal>,
    ) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_booking");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            UPDATE bookings SET
                check_in = COALESCE($2, check_in),
                check_out = COALESCE($3, check_out),
                status = COALESCE($4, status),
                total_amount = COALESCE($5, total_amount),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(check_in)
        .bind(check_out)
        .bind(status)
        .bind(total_amount)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a booking.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, booking_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_booking");
        let result = sqlx::query(
            r#"
            DELETE FROM bookings WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
