use crate::db::enums::BookingStatus;
use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::resource_bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResourceBooking {
    pub id: Uuid,
    pub resource_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: Option<String>,
    pub status: BookingStatus,
    pub review_note: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceBooking {
    pub fn window(&self) -> BookingWindow {
        BookingWindow {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::resource_bookings)]
pub struct NewResourceBooking {
    pub resource_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: Option<String>,
    pub status: BookingStatus,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::resource_bookings)]
pub struct BookingReview {
    pub status: BookingStatus,
    pub review_note: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

/// Half-open time range `[start, end)` held by a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BookingWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when the two ranges share any instant. Back-to-back ranges do not overlap.
    pub fn overlaps(&self, other: &BookingWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreateBookingRequest {
    pub resource_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
    pub note: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct BookingListQuery {
    pub resource_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
