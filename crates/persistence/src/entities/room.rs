//! Room entity (database row mapping).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Room;

/// Database row mapping for the rooms table.
#[derive(Debug, Clone, FromRow)]
pub struct RoomEntity {
    pub id: Uuid,
    pub number: String,
    pub room_type: String,
    pub capacity: i32,
    pub price_per_night: Decimal, // NUMERIC
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoomEntity> for Room {
    fn from(entity: RoomEntity) -> Self {
        Self {
            id: entity.id,
            number: entity.number,
            room_type: entity.room_type,
            capacity: entity.capacity,
            price_per_night: entity.price_per_night,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
