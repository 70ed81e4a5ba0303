//! Room endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{BookingRepository, RoomRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::{map_restricted_delete, ApiError};
use domain::models::booking::BookingResponse;
use domain::models::room::{CreateRoomRequest, ListRoomsResponse, RoomResponse, UpdateRoomRequest};

fn room_not_found() -> ApiError {
    ApiError::NotFound("Room not found".to_string())
}

fn room_number_taken(number: &str) -> ApiError {
    ApiError::Conflict(format!("Room number '{}' already exists", number))
}

/// Create a room.
///
/// POST /api/v1/rooms
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), ApiError> {
    request.validate()?;

    let room_repo = RoomRepository::new(state.pool.clone());
    if room_repo.find_by_number(&request.number).await?.is_some() {
        return Err(room_number_taken(&request.number));
    }

    let entity = room_repo
        .create(
            &request.number,
            &request.room_type,
            request.capacity,
            request.price_per_night,
        )
        .await?;

    let room: domain::models::Room = entity.into();
    let response: RoomResponse = room.into();

    info!(room_id = %response.id, number = %response.number, "Room created");

    Ok((StatusCode::CREATED, Json(response)))
}

/// List all rooms ordered by number.
///
/// GET /api/v1/rooms
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<ListRoomsResponse>, ApiError> {
    let room_repo = RoomRepository::new(state.pool.clone());
    let rooms: Vec<RoomResponse> = room_repo
        .list()
        .await?
        .into_iter()
        .map(|e| {
            let r: domain::models::Room = e.into();
            r.into()
        })
        .collect();
    let total = rooms.len();

    Ok(Json(ListRoomsResponse { rooms, total }))
}

/// Get a single room by ID.
///
/// GET /api/v1/rooms/:room_id
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<RoomResponse>, ApiError> {
    let room_repo = RoomRepository::new(state.pool.clone());
    let entity = room_repo
        .find_by_id(room_id)
        .await?
        .ok_or_else(room_not_found)?;

    let room: domain::models::Room = entity.into();
    Ok(Json(room.into()))
}

/// Update a room (partial update).
///
/// PATCH /api/v1/rooms/:room_id
pub async fn update_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, ApiError> {
    request.validate()?;

    let room_repo = RoomRepository::new(state.pool.clone());
    if let Some(ref number) = request.number {
        if let Some(existing) = room_repo.find_by_number(number).await? {
            if existing.id != room_id {
                return Err(room_number_taken(number));
            }
        }
    }

    let entity = room_repo
        .update(
            room_id,
            request.number.as_deref(),
            request.room_type.as_deref(),
            request.capacity,
            request.price_per_night,
        )
        .await?
        .ok_or_else(room_not_found)?;

    let room: domain::models::Room = entity.into();
    let response: RoomResponse = room.into();

    info!(room_id = %response.id, "Room updated");

    Ok(Json(response))
}

/// Delete a room.
///
/// DELETE /api/v1/rooms/:room_id
///
/// Refused with 409 while any booking still references the room.
pub async fn delete_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let room_repo = RoomRepository::new(state.pool.clone());
    let rows_affected = room_repo
        .delete(room_id)
        .await
        .map_err(|e| map_restricted_delete(e, "Room"))?;

    if rows_affected == 0 {
        return Err(room_not_found());
    }

    info!(room_id = %room_id, "Room deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// List the bookings of a room, ordered by check-in.
///
/// GET /api/v1/rooms/:room_id/bookings
pub async fn list_room_bookings(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let room_repo = RoomRepository::new(state.pool.clone());
    if room_repo.find_by_id(room_id).await?.is_none() {
        return Err(room_not_found());
    }

    let booking_repo = BookingRepository::new(state.pool.clone());
    let bookings = booking_repo
        .find_by_room_id(room_id)
        .await?
        .into_iter()
        .map(|e| {
            let b: domain::models::Booking = e.into();
            b.into()
        })
        .collect();

    Ok(Json(bookings))
}
