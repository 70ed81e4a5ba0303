//! Booking domain model.
//!
//! A booking references exactly one guest and one room by foreign key. The
//! store keeps `check_in`, `check_out`, `status` and `total_amount` exactly as
//! written; ordering of the stay window and amount sign are checked on the
//! request payloads only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Status given to bookings created without an explicit one.
pub const DEFAULT_BOOKING_STATUS: &str = "pending";

/// A reservation of one room by one guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    /// Free-form status; no state machine is attached to it.
    pub status: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Guest fields resolved through a booking's `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BookingGuest {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}

/// Room fields resolved through a booking's `room_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BookingRoom {
    pub id: Uuid,
    pub number: String,
    pub room_type: String,
}

/// A booking together with the records it references.
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking: Booking,
    pub user: BookingGuest,
    pub room: BookingRoom,
}

fn default_status() -> String {
    DEFAULT_BOOKING_STATUS.to_string()
}

/// Request payload for creating a booking.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_create_booking"))]
pub struct CreateBookingRequest {
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,

    #[serde(default = "default_status")]
    #[validate(length(min = 1, max = 50, message = "Status must be 1-50 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub status: String,

    pub total_amount: Decimal,
}

fn validate_create_booking(request: &CreateBookingRequest) -> Result<(), ValidationError> {
    shared::validation::validate_stay_dates(&request.check_in, &request.check_out)?;
    shared::validation::validate_amount(&request.total_amount)
}

/// Request payload for updating a booking (partial update).
///
/// When only one end of the stay is supplied, the window is re-checked against
/// the stored booking before writing.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_update_booking"))]
pub struct UpdateBookingRequest {
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 50, message = "Status must be 1-50 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub status: Option<String>,

    pub total_amount: Option<Decimal>,
}

impl UpdateBookingRequest {
    /// Returns true if the request changes either end of the stay.
    pub fn touches_stay(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some()
    }
}

fn validate_update_booking(request: &UpdateBookingRequest) -> Result<(), ValidationError> {
    if let (Some(check_in), Some(check_out)) = (&request.check_in, &request.check_out) {
        shared::validation::validate_stay_dates(check_in, check_out)?;
    }
    match &request.total_amount {
        Some(amount) => shared::validation::validate_amount(amount),
        None => Ok(()),
    }
}

/// Response payload for booking operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub status: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            room_id: b.room_id,
            check_in: b.check_in,
            check_out: b.check_out,
            status: b.status,
            total_amount: b.total_amount,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Booking response with the guest and room it references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BookingDetailsResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub user: BookingGuest,
    pub room: BookingRoom,
}

impl From<BookingDetails> for BookingDetailsResponse {
    fn from(d: BookingDetails) -> Self {
        Self {
            booking: d.booking.into(),
            user: d.user,
            room: d.room,
        }
    }
}

/// Query parameters for listing bookings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListBookingsQuery {
    pub user_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub status: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Response for listing bookings, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListBookingsResponse {
    pub bookings: Vec<BookingResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}
