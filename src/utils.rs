use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// The current local time, or UTC when the local offset cannot be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Today's date in local time.
pub fn today() -> Date {
    now().date()
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| at.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_timestamp_format() {
        assert_eq!(timestamp(datetime!(2025-06-01 09:05:07 UTC)), "2025-06-01 09:05:07");
    }
}
