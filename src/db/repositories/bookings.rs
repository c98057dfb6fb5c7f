use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::enums::BookingStatus;
use crate::db::models::api::PageParams;
use crate::db::models::booking::{
    BookingReview, BookingWindow, NewResourceBooking, ResourceBooking,
};
use crate::schema::resource_bookings;

pub struct BookingsRepo;

/// Storage text of each status, for `IN (...)` filters.
fn status_texts(statuses: &[BookingStatus]) -> Vec<&'static str> {
    statuses.iter().map(BookingStatus::as_str).collect()
}

/// Listing filters after permission scoping.
#[derive(Debug, Default)]
pub struct BookingFilter {
    pub resource_id: Option<uuid::Uuid>,
    pub user_id: Option<uuid::Uuid>,
    pub status: Option<BookingStatus>,
}

impl BookingsRepo {
    fn filtered(filter: &BookingFilter) -> resource_bookings::BoxedQuery<'static, Pg> {
        use crate::schema::resource_bookings::dsl::*;

        let mut boxed = resource_bookings.into_boxed();
        if let Some(r) = filter.resource_id {
            boxed = boxed.filter(resource_id.eq(r));
        }
        if let Some(u) = filter.user_id {
            boxed = boxed.filter(user_id.eq(u));
        }
        if let Some(s) = filter.status {
            boxed = boxed.filter(status.eq(s));
        }
        boxed
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &BookingFilter,
        params: &PageParams,
    ) -> Result<(Vec<ResourceBooking>, i64), diesel::result::Error> {
        use crate::schema::resource_bookings::dsl::*;

        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order(start_time.desc())
            .limit(params.per_page())
            .offset(params.offset())
            .select(ResourceBooking::as_select())
            .load(conn)?;
        Ok((items, total))
    }

    /// Bookings of `resource` in one of `statuses` that overlap `window`,
    /// earliest first. The predicate is the half-open test
    /// `existing.start < window.end AND existing.end > window.start`, which
    /// covers an existing booking that contains the new start, contains the
    /// new end, or sits inside the new range.
    pub fn find_overlapping(
        conn: &mut PgConnection,
        resource: uuid::Uuid,
        window: &BookingWindow,
        statuses: &[BookingStatus],
    ) -> Result<Vec<ResourceBooking>, diesel::result::Error> {
        use crate::schema::resource_bookings::dsl::*;

        resource_bookings
            .filter(resource_id.eq(resource))
            .filter(start_time.lt(window.end))
            .filter(end_time.gt(window.start))
            .filter(status.eq_any(status_texts(statuses)))
            .order(start_time.asc())
            .select(ResourceBooking::as_select())
            .load(conn)
    }

    /// Slot-holding bookings of `resource` intersecting `[from, to)`.
    pub fn list_blocking_in_range(
        conn: &mut PgConnection,
        resource: uuid::Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ResourceBooking>, diesel::result::Error> {
        use crate::schema::resource_bookings::dsl::*;
        resource_bookings
            .filter(resource_id.eq(resource))
            .filter(start_time.lt(to))
            .filter(end_time.gt(from))
            .filter(status.eq_any(status_texts(&BookingStatus::BLOCKING)))
            .order(start_time.asc())
            .select(ResourceBooking::as_select())
            .load(conn)
    }

    pub fn has_upcoming_blocking(
        conn: &mut PgConnection,
        resource: uuid::Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::resource_bookings::dsl::*;
        diesel::select(diesel::dsl::exists(
            resource_bookings
                .filter(resource_id.eq(resource))
                .filter(end_time.gt(now))
                .filter(status.eq_any(status_texts(&BookingStatus::BLOCKING))),
        ))
        .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        booking_id: uuid::Uuid,
    ) -> Result<Option<ResourceBooking>, diesel::result::Error> {
        resource_bookings::table
            .find(booking_id)
            .select(ResourceBooking::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_booking: &NewResourceBooking,
    ) -> Result<ResourceBooking, diesel::result::Error> {
        diesel::insert_into(resource_bookings::table)
            .values(new_booking)
            .returning(ResourceBooking::as_returning())
            .get_result(conn)
    }

    pub fn apply_review(
        conn: &mut PgConnection,
        booking_id: uuid::Uuid,
        review: &BookingReview,
    ) -> Result<ResourceBooking, diesel::result::Error> {
        diesel::update(resource_bookings::table.find(booking_id))
            .set(review)
            .returning(ResourceBooking::as_returning())
            .get_result(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_filter_matches_stored_text() {
        assert_eq!(status_texts(&BookingStatus::BLOCKING), vec!["pending", "approved"]);
        assert!(status_texts(&[]).is_empty());
    }
}
