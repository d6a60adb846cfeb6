//! Field validation for operator input.

use crate::error::{HospitalError, HospitalResult};
use crate::models::SlotTime;
use time::macros::format_description;
use time::Date;

/// Trims `value` and rejects it if empty or if it contains control characters.
pub fn required(field: &'static str, value: &str) -> HospitalResult<String> {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_control) {
        return Err(HospitalError::EmptyField(field));
    }
    Ok(value.to_string())
}

/// Parses a patient age, which must be a whole number between 1 and 99.
pub fn age(value: &str) -> HospitalResult<u8> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HospitalError::InvalidAge(value.to_string()));
    }
    match value.parse::<u8>() {
        Ok(age) if (1..=99).contains(&age) => Ok(age),
        _ => Err(HospitalError::InvalidAge(value.to_string())),
    }
}

/// Validates a 10-digit phone number starting with 6, 7, 8 or 9.
pub fn phone(value: &str) -> HospitalResult<String> {
    let value = value.trim();
    let valid = value.len() == 10
        && value.bytes().all(|b| b.is_ascii_digit())
        && matches!(value.as_bytes()[0], b'6'..=b'9');
    if valid {
        Ok(value.to_string())
    } else {
        Err(HospitalError::InvalidPhone(value.to_string()))
    }
}

/// Validates a price: a finite decimal greater than zero. The trimmed text is kept.
pub fn price(value: &str) -> HospitalResult<String> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(value.to_string()),
        _ => Err(HospitalError::InvalidPrice(value.to_string())),
    }
}

/// Parses an ISO `YYYY-MM-DD` date that must not lie before `today`.
pub fn appointment_date(value: &str, today: Date) -> HospitalResult<Date> {
    let value = value.trim();
    let date = Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| HospitalError::InvalidDate(value.to_string()))?;
    if date < today {
        return Err(HospitalError::InvalidDate(value.to_string()));
    }
    Ok(date)
}

/// Parses a 24-hour `HH:MM` time.
pub fn appointment_time(value: &str) -> HospitalResult<SlotTime> {
    value.trim().parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::macros::date;

    #[test]
    fn test_age_bounds() {
        assert_eq!(age("1").unwrap(), 1);
        assert_eq!(age(" 99 ").unwrap(), 99);
        for bad in ["0", "100", "-5", "abc", "", "4.5", "+7"] {
            assert!(matches!(age(bad), Err(HospitalError::InvalidAge(_))), "{bad}");
        }
    }

    #[test]
    fn test_phone_format() {
        assert!(phone("9876543210").is_ok());
        assert!(phone("6000000000").is_ok());
        for bad in ["5876543210", "987654321", "98765432101", "98765x3210", ""] {
            assert!(matches!(phone(bad), Err(HospitalError::InvalidPhone(_))), "{bad}");
        }
    }

    #[test]
    fn test_price() {
        assert_eq!(price(" 12.50 ").unwrap(), "12.50");
        assert!(price("3").is_ok());
        for bad in ["0", "-1", "abc", "", "NaN", "inf"] {
            assert!(matches!(price(bad), Err(HospitalError::InvalidPrice(_))), "{bad}");
        }
    }

    #[test]
    fn test_required_rejects_blank_and_control_chars() {
        assert_eq!(required("Name", "  Alice ").unwrap(), "Alice");
        assert!(matches!(required("Name", "   "), Err(HospitalError::EmptyField("Name"))));
        assert!(required("Name", "Al\nice").is_err());
    }

    #[test]
    fn test_date_today_is_inclusive() {
        let today = date!(2025 - 06 - 01);
        assert_eq!(appointment_date("2025-06-01", today).unwrap(), today);
        assert!(appointment_date("2025-12-31", today).is_ok());
        assert!(matches!(
            appointment_date("2025-05-31", today),
            Err(HospitalError::InvalidDate(_))
        ));
        for bad in ["2025-02-30", "01-06-2025", "2025/06/01", "tomorrow"] {
            assert!(appointment_date(bad, today).is_err(), "{bad}");
        }
    }

    proptest! {
        #[test]
        fn prop_time_accepts_every_valid_clock_reading(h in 0u8..24, m in 0u8..60) {
            let parsed = appointment_time(&format!("{h:02}:{m:02}")).unwrap();
            prop_assert_eq!(parsed.hour(), h);
            prop_assert_eq!(parsed.minute(), m);
        }

        #[test]
        fn prop_time_rejects_out_of_range(h in 24u8..100, m in 60u8..100) {
            let bad_hour = format!("{h}:00");
            let bad_minute = format!("12:{m}");
            prop_assert!(appointment_time(&bad_hour).is_err());
            prop_assert!(appointment_time(&bad_minute).is_err());
        }
    }
}
