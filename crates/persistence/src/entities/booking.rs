//! Booking entity (database row mapping).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::booking::{Booking, BookingDetails, BookingGuest, BookingRoom};

/// Database row mapping for the bookings table.
#[derive(Debug, Clone, FromRow)]
pub struct BookingEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub status: String,
    pub total_amount: Decimal, // NUMERIC
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingEntity> for Booking {
    fn from(entity: BookingEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            room_id: entity.room_id,
            check_in: entity.check_in,
            check_out: entity.check_out,
            status: entity.status,
            total_amount: entity.total_amount,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A booking row joined with its guest and room.
#[derive(Debug, Clone, FromRow)]
pub struct BookingDetailsEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub status: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_email: String,
    pub user_full_name: String,
    pub room_number: String,
    pub room_type: String,
}

impl From<BookingDetailsEntity> for BookingDetails {
    fn from(entity: BookingDetailsEntity) -> Self {
        Self {
            user: BookingGuest {
                id: entity.user_id,
                email: entity.user_email,
                full_name: entity.user_full_name,
            },
            room: BookingRoom {
                id: entity.room_id,
                number: entity.room_number,
                room_type: entity.room_type,
            },
            booking: Booking {
                id: entity.id,
                user_id: entity.user_id,
                room_id: entity.room_id,
                check_in: entity.check_in,
                check_out: entity.check_out,
                status: entity.status,
                total_amount: entity.total_amount,
                created_at: entity.created_at,
                updated_at: entity.updated_at,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn create_test_booking_entity() -> BookingEntity {
        BookingEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            check_in: Utc.with_ymd_and_hms(2024, 9, 10, 14, 0, 0).unwrap(),
            check_out: Utc.with_ymd_and_hms(2024, 9, 12, 10, 0, 0).unwrap(),
            status: "confirmed".to_string(),
            total_amount: Decimal::from_str("240.00").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_booking_entity_to_domain() {
        let entity = create_test_booking_entity();
        let booking: Booking = entity.clone().into();

        assert_eq!(booking.id, entity.id);
        assert_eq!(booking.user_id, entity.user_id);
        assert_eq!(booking.room_id, entity.room_id);
        assert_eq!(booking.check_in, entity.check_in);
        assert_eq!(booking.check_out, entity.check_out);
        assert_eq!(booking.status, "confirmed");
        assert_eq!(booking.total_amount, entity.total_amount);
    }

    #[test]
    fn test_booking_entity_keeps_amount_scale() {
        let mut entity = create_test_booking_entity();
        entity.total_amount = Decimal::from_str("0.1000").unwrap();

        let booking: Booking = entity.into();
        assert_eq!(booking.total_amount.to_string(), "0.1000");
    }

    #[test]
    fn test_booking_details_entity_to_domain() {
        let base = create_test_booking_entity();
        let entity = BookingDetailsEntity {
            id: base.id,
            user_id: base.user_id,
            room_id: base.room_id,
            check_in: base.check_in,
            check_out: base.check_out,
            status: base.status.clone(),
            total_amount: base.total_amount,
            created_at: base.created_at,
            updated_at: base.updated_at,
            user_email: "ana@example.com".to_string(),
            user_full_name: "Ana Torres".to_string(),
            room_number: "101".to_string(),
            room_type: "double".to_string(),
        };

        let details: BookingDetails = entity.into();
        assert_eq!(details.booking.id, base.id);
        assert_eq!(details.user.id, base.user_id);
        assert_eq!(details.user.email, "ana@example.com");
        assert_eq!(details.room.id, base.room_id);
        assert_eq!(details.room.number, "101");
    }
}
