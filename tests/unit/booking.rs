use chrono::{DateTime, Duration, TimeZone, Utc};
use lab_portal::db::enums::BookingStatus;
use lab_portal::db::models::booking::BookingWindow;
use lab_portal::services::bookings_service::check_transition;
use lab_portal::validation::booking::{validate_booking_window, validate_query_range};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2031, 5, day, hour, 0, 0).unwrap()
}

#[test]
fn windows_are_half_open() {
    let morning = BookingWindow::new(at(1, 9), at(1, 11));
    let adjacent = BookingWindow::new(at(1, 11), at(1, 12));
    let inside = BookingWindow::new(at(1, 10), at(1, 10) + Duration::minutes(30));
    let spanning = BookingWindow::new(at(1, 8), at(1, 13));

    assert!(!morning.overlaps(&adjacent));
    assert!(!adjacent.overlaps(&morning));
    assert!(morning.overlaps(&inside));
    assert!(spanning.overlaps(&morning));
}

#[test]
fn booking_window_rules() {
    let now = at(1, 8);

    assert!(validate_booking_window(&BookingWindow::new(at(1, 9), at(1, 10)), now, 72).is_ok());
    // empty and reversed
    assert!(validate_booking_window(&BookingWindow::new(at(1, 9), at(1, 9)), now, 72).is_err());
    assert!(validate_booking_window(&BookingWindow::new(at(1, 10), at(1, 9)), now, 72).is_err());
    // starts in the past
    assert!(validate_booking_window(&BookingWindow::new(at(1, 7), at(1, 9)), now, 72).is_err());
    // longer than the configured maximum
    assert!(validate_booking_window(&BookingWindow::new(at(1, 9), at(5, 9)), now, 72).is_err());
    assert!(validate_booking_window(&BookingWindow::new(at(1, 9), at(4, 9)), now, 72).is_ok());
}

#[test]
fn availability_range_is_bounded() {
    assert!(validate_query_range(at(1, 0), at(8, 0)).is_ok());
    assert!(validate_query_range(at(8, 0), at(1, 0)).is_err());
    assert!(validate_query_range(at(1, 0), at(1, 0) + Duration::days(120)).is_err());
}

#[test]
fn lifecycle_transitions() {
    use BookingStatus::*;

    assert!(check_transition(Pending, Approved).is_ok());
    assert!(check_transition(Pending, Rejected).is_ok());
    assert!(check_transition(Approved, Cancelled).is_ok());
    assert!(check_transition(Approved, Completed).is_ok());

    for terminal in [Rejected, Cancelled, Completed] {
        assert!(terminal.is_terminal());
        for next in BookingStatus::ALL {
            assert!(check_transition(terminal, *next).is_err());
        }
    }

    let err = check_transition(Pending, Completed).unwrap_err();
    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
}

#[test]
fn initial_status_follows_resource_policy() {
    assert_eq!(BookingStatus::initial(true), BookingStatus::Pending);
    assert_eq!(BookingStatus::initial(false), BookingStatus::Approved);
    assert!(BookingStatus::BLOCKING.contains(&BookingStatus::initial(true)));
    assert!(BookingStatus::BLOCKING.contains(&BookingStatus::initial(false)));
    assert!(!BookingStatus::BLOCKING.contains(&BookingStatus::Cancelled));
}

#[test]
fn status_wire_format_is_uppercase() {
    assert_eq!(serde_json::to_string(&BookingStatus::Approved).unwrap(), "\"APPROVED\"");
    let parsed: BookingStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
    assert_eq!(parsed, BookingStatus::Cancelled);
    assert_eq!(BookingStatus::Cancelled.as_str(), "cancelled");
}
