//! Booking endpoint handlers.
//!
//! Overlapping stays in the same room are accepted; no availability check
//! runs before a booking is written.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{
    BookingListFilter, BookingRepository, RoomRepository, UserRepository,
};
use shared::pagination::{clamp_limit, decode_cursor, split_page};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{record_booking_event, BookingEvent};
use domain::models::booking::{
    BookingDetailsResponse, BookingResponse, CreateBookingRequest, ListBookingsQuery,
    ListBookingsResponse, UpdateBookingRequest,
};

fn booking_not_found() -> ApiError {
    ApiError::NotFound("Booking not found".to_string())
}

/// Create a booking.
///
/// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    request.validate()?;

    // Resolve both references up front for clearer errors; the foreign keys
    // still reject a row deleted in between.
    let user_repo = UserRepository::new(state.pool.clone());
    if user_repo.find_by_id(request.user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let room_repo = RoomRepository::new(state.pool.clone());
    if room_repo.find_by_id(request.room_id).await?.is_none() {
        return Err(ApiError::NotFound("Room not found".to_string()));
    }

    let booking_repo = BookingRepository::new(state.pool.clone());
    let entity = booking_repo
        .create(
            request.user_id,
            request.room_id,
            request.check_in,
            request.check_out,
            &request.status,
            request.total_amount,
        )
        .await?;

    let booking: domain::models::Booking = entity.into();
    let response: BookingResponse = booking.into();

    record_booking_event(BookingEvent::Created);
    info!(
        booking_id = %response.id,
        user_id = %response.user_id,
        room_id = %response.room_id,
        status = %response.status,
        "Booking created"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// List bookings, newest first.
///
/// GET /api/v1/bookings?user_id=&room_id=&status=&cursor=&limit=
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, ApiError> {
    let after = query.cursor.as_deref().map(decode_cursor).transpose()?;
    let limit = clamp_limit(query.limit);

    let filter = BookingListFilter {
        user_id: query.user_id,
        room_id: query.room_id,
        status: query.status,
        after,
        // One extra row tells whether another page exists
        limit: limit + 1,
    };

    let booking_repo = BookingRepository::new(state.pool.clone());
    let entities = booking_repo.list(&filter).await?;
    let (entities, next_cursor) = split_page(entities, limit, |e| (e.created_at, e.id));

    let bookings = entities
        .into_iter()
        .map(|e| {
            let b: domain::models::Booking = e.into();
            b.into()
        })
        .collect();

    Ok(Json(ListBookingsResponse {
        bookings,
        next_cursor,
    }))
}

/// Get a booking with the guest and room it references.
///
/// GET /api/v1/bookings/:booking_id
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingDetailsResponse>, ApiError> {
    let booking_repo = BookingRepository::new(state.pool.clone());
    let entity = booking_repo
        .find_details_by_id(booking_id)
        .await?
        .ok_or_else(booking_not_found)?;

    let details: domain::models::BookingDetails = entity.into();
    Ok(Json(details.into()))
}

/// Update a booking (partial update).
///
/// PATCH /api/v1/bookings/:booking_id
pub async fn update_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    request.validate()?;

    let booking_repo = BookingRepository::new(state.pool.clone());

    // A single moved end must still leave a valid window with the stored one
    let both_ends = request.check_in.is_some() && request.check_out.is_some();
    if request.touches_stay() && !both_ends {
        let current = booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(booking_not_found)?;
        let check_in = request.check_in.unwrap_or(current.check_in);
        let check_out = request.check_out.unwrap_or(current.check_out);
        shared::validation::validate_stay_dates(&check_in, &check_out)?;
    }

    let entity = booking_repo
        .update(
            booking_id,
            request.check_in,
            request.check_out,
            request.status.as_deref(),
            request.total_amount,
        )
        .await?
        .ok_or_else(booking_not_found)?;

    let booking: domain::models::Booking = entity.into();
    let response: BookingResponse = booking.into();

    record_booking_event(BookingEvent::Updated);
    info!(booking_id = %response.id, status = %response.status, "Booking updated");

    Ok(Json(response))
}

/// Delete a booking.
///
/// DELETE /api/v1/bookings/:booking_id
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let booking_repo = BookingRepository::new(state.pool.clone());
    let rows_affected = booking_repo.delete(booking_id).await?;

    if rows_affected == 0 {
        return Err(booking_not_found());
    }

    record_booking_event(BookingEvent::Deleted);
    info!(booking_id = %booking_id, "Booking deleted");
    Ok(StatusCode::NO_CONTENT)
}
