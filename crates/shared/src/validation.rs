//! Common validation utilities.

use chrono::{DateTime, Duration, Timelike, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

/// Longest stay accepted by the booking endpoints, in nights.
pub const MAX_STAY_NIGHTS: i64 = 365;

/// Validates that a monetary amount is non-negative.
pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut err = ValidationError::new("amount_negative");
        err.message = Some("Amount must be non-negative".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a timestamp fits the microsecond resolution of `TIMESTAMPTZ`.
pub fn validate_timestamp_precision(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if value.nanosecond() % 1_000 != 0 {
        let mut err = ValidationError::new("timestamp_precision");
        err.message = Some("Timestamps cannot be more precise than microseconds".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a stay window.
/// - Both ends must fit microsecond resolution
/// - Check-out must be strictly after check-in
/// - The stay must not exceed `MAX_STAY_NIGHTS`
pub fn validate_stay_dates(
    check_in: &DateTime<Utc>,
    check_out: &DateTime<Utc>,
) -> Result<(), ValidationError> {
    validate_timestamp_precision(check_in)?;
    validate_timestamp_precision(check_out)?;

    if check_out <= check_in {
        let mut err = ValidationError::new("stay_order");
        err.message = Some("Check-out must be after check-in".into());
        return Err(err);
    }

    if *check_out - *check_in > Duration::days(MAX_STAY_NIGHTS) {
        let mut err = ValidationError::new("stay_length");
        err.message = Some("Stay cannot be longer than 365 nights".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a free-text field is not only whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value cannot be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(&Decimal::ZERO).is_ok());
        assert!(validate_amount(&Decimal::from_str("450.00").unwrap()).is_ok());
        assert!(validate_amount(&Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_validate_amount_negative_zero() {
        // -0.00 parses with the sign bit set but is still zero
        let negative_zero = Decimal::from_str("-0.00").unwrap();
        assert!(validate_amount(&negative_zero).is_ok());
    }

    #[test]
    fn test_validate_amount_error_message() {
        let err = validate_amount(&Decimal::from_str("-10").unwrap()).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Amount must be non-negative"
        );
    }

    #[test]
    fn test_validate_stay_dates() {
        assert!(validate_stay_dates(&at(1, 15), &at(3, 11)).is_ok());
        assert!(validate_stay_dates(&at(1, 15), &at(1, 16)).is_ok());
    }

    #[test]
    fn test_validate_stay_dates_rejects_reversed_and_empty() {
        let err = validate_stay_dates(&at(3, 11), &at(1, 15)).unwrap_err();
        assert_eq!(err.code, "stay_order");

        let err = validate_stay_dates(&at(2, 12), &at(2, 12)).unwrap_err();
        assert_eq!(err.code, "stay_order");
    }

    #[test]
    fn test_validate_stay_dates_too_long() {
        let check_in = at(1, 15);
        let check_out = check_in + Duration::days(MAX_STAY_NIGHTS + 1);
        let err = validate_stay_dates(&check_in, &check_out).unwrap_err();
        assert_eq!(err.code, "stay_length");

        let check_out = check_in + Duration::days(MAX_STAY_NIGHTS);
        assert!(validate_stay_dates(&check_in, &check_out).is_ok());
    }

    #[test]
    fn test_validate_timestamp_precision() {
        let micros = at(1, 15) + Duration::microseconds(123_456);
        assert!(validate_timestamp_precision(&micros).is_ok());

        let nanos = at(1, 15) + Duration::nanoseconds(100);
        let err = validate_timestamp_precision(&nanos).unwrap_err();
        assert_eq!(err.code, "timestamp_precision");
    }

    #[test]
    fn test_validate_stay_dates_rejects_sub_microsecond_window() {
        // Both ends collapse to the same stored value
        let check_in = at(1, 15) + Duration::nanoseconds(100);
        let check_out = at(1, 15) + Duration::nanoseconds(200);
        let err = validate_stay_dates(&check_in, &check_out).unwrap_err();
        assert_eq!(err.code, "timestamp_precision");
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("confirmed").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }
}
