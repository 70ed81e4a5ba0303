//! Room repository for database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RoomEntity;
use crate::metrics::QueryTimer;

/// Repository for room-related database operations.
#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Creates a new RoomRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new room.
    pub async fn create(
        &self,
        number: &str,
        room_type: &str,
        capacity: i32,
        price_per_night: Decimal,
    ) -> Result<RoomEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_room");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            INSERT INTO rooms (number, room_type, capacity, price_per_night)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(number)
        .bind(room_type)
        .bind(capacity)
        .bind(price_per_night)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find room by ID.
    pub async fn find_by_id(&self, room_id: Uuid) -> Result<Option<RoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_room_by_id");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            SELECT * FROM rooms WHERE id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find room by its number.
    pub async fn find_by_number(&self, number: &str) -> Result<Option<RoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_room_by_number");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            SELECT * FROM rooms WHERE number = $1
            "#,
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List rooms ordered by number.
    pub async fn list(&self) -> Result<Vec<RoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_rooms");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            SELECT * FROM rooms ORDER BY number
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a room (partial update).
    /// Only provided fields are updated; None values are preserved.
    pub async fn update(
        &self,
        room_id: Uuid,
        number: Option<&str>,
        room_type: Option<&str>,
        capacity: Option<i32>,
        price_per_night: Option<Decimal>,
    ) -> Result<Option<RoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_room");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            UPDATE rooms SET
                number = COALESCE($2, number),
                room_type = COALESCE($3, room_type),
                capacity = COALESCE($4, capacity),
                price_per_night = COALESCE($5, price_per_night),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(number)
        .bind(room_type)
        .bind(capacity)
        .bind(price_per_night)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a room.
    /// Returns the number of rows deleted (0 or 1). Fails with a foreign key
    /// violation while bookings still reference the room.
    pub async fn delete(&self, room_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_room");
        let result = sqlx::query(
            r#"
            DELETE FROM rooms WHERE id = $1
            "#,
        )
        .bind(room_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
