use chrono::{DateTime, Duration, Utc};

use crate::db::models::booking::BookingWindow;
use crate::error::AppError;

pub const MAX_PURPOSE_LEN: usize = 1000;

pub fn validate_booking_window(
    window: &BookingWindow,
    now: DateTime<Utc>,
    max_hours: i64,
) -> Result<(), AppError> {
    if window.end <= window.start {
        return Err(AppError::validation("End time must be after start time"));
    }
    if window.start < now {
        return Err(AppError::validation("Bookings cannot start in the past"));
    }
    if window.duration() > Duration::hours(max_hours) {
        return Err(AppError::validation(format!(
            "Bookings cannot be longer than {} hours",
            max_hours
        )));
    }
    Ok(())
}

pub fn validate_purpose(purpose: Option<&str>) -> Result<(), AppError> {
    if let Some(text) = purpose {
        if text.chars().count() > MAX_PURPOSE_LEN {
            return Err(AppError::validation(format!(
                "Purpose must be {} characters or less",
                MAX_PURPOSE_LEN
            )));
        }
    }
    Ok(())
}

/// Range check for the availability endpoint.
pub fn validate_query_range(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<(), AppError> {
    if to <= from {
        return Err(AppError::validation("'to' must be after 'from'"));
    }
    if to - from > Duration::days(93) {
        return Err(AppError::validation("Availability range cannot exceed 93 days"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, 4, hour, 0, 0).unwrap()
    }

    #[test]
    fn rejects_inverted_or_empty_windows() {
        let now = at(0);
        assert!(validate_booking_window(&BookingWindow::new(at(10), at(9)), now, 72).is_err());
        assert!(validate_booking_window(&BookingWindow::new(at(10), at(10)), now, 72).is_err());
        assert!(validate_booking_window(&BookingWindow::new(at(10), at(11)), now, 72).is_ok());
    }

    #[test]
    fn rejects_past_and_overlong_bookings() {
        assert!(validate_booking_window(&BookingWindow::new(at(8), at(9)), at(9), 72).is_err());
        assert!(validate_booking_window(&BookingWindow::new(at(1), at(5)), at(0), 3).is_err());
        assert!(validate_booking_window(&BookingWindow::new(at(1), at(4)), at(0), 3).is_ok());
    }

    #[test]
    fn purpose_length() {
        assert!(validate_purpose(None).is_ok());
        assert!(validate_purpose(Some(&"a".repeat(MAX_PURPOSE_LEN))).is_ok());
        assert!(validate_purpose(Some(&"a".repeat(MAX_PURPOSE_LEN + 1))).is_err());
    }
}
