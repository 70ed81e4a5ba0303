//! Room domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A bookable hotel room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Room {
    pub id: Uuid,
    pub number: String,
    pub room_type: String,
    pub capacity: i32,
    pub price_per_night: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

lazy_static::lazy_static! {
    /// Room numbers such as `101`, `B12` or `PH-2`.
    pub static ref ROOM_NUMBER_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9-]{1,16}$").unwrap();
}

/// Request payload for creating a room.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_create_room"))]
pub struct CreateRoomRequest {
    #[validate(regex(
        path = *ROOM_NUMBER_REGEX,
        message = "Room number must be 1-16 letters, digits or dashes"
    ))]
    pub number: String,

    #[validate(length(min = 1, max = 50, message = "Room type must be 1-50 characters"))]
    pub room_type: String,

    #[validate(range(min = 1, max = 20, message = "Capacity must be between 1 and 20"))]
    pub capacity: i32,

    pub price_per_night: Decimal,
}

fn validate_create_room(request: &CreateRoomRequest) -> Result<(), ValidationError> {
    shared::validation::validate_amount(&request.price_per_night)
}

/// Request payload for updating a room (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_update_room"))]
pub struct UpdateRoomRequest {
    #[validate(regex(
        path = *ROOM_NUMBER_REGEX,
        message = "Room number must be 1-16 letters, digits or dashes"
    ))]
    pub number: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Room type must be 1-50 characters"))]
    pub room_type: Option<String>,

    #[validate(range(min = 1, max = 20, message = "Capacity must be between 1 and 20"))]
    pub capacity: Option<i32>,

    pub price_per_night: Option<Decimal>,
}

fn validate_update_room(request: &UpdateRoomRequest) -> Result<(), ValidationError> {
    match &request.price_per_night {
        Some(price) => shared::validation::validate_amount(price),
        None => Ok(()),
    }
}

/// Response payload for room operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RoomResponse {
    pub id: Uuid,
    pub number: String,
    pub room_type: String,
    pub capacity: i32,
    pub price_per_night: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            number: r.number,
            room_type: r.room_type,
            capacity: r.capacity,
            price_per_night: r.price_per_night,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response for listing rooms.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListRoomsResponse {
    pub rooms: Vec<RoomResponse>,
    pub total: usize,
}
