use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::BookingStatus,
    db::models::api::{Page, PageParams, error_codes},
    db::models::booking::{
        BookingListQuery, BookingReview, BookingWindow, CreateBookingRequest, NewResourceBooking,
        ResourceBooking, UpdateBookingStatusRequest,
    },
    db::repositories::{
        bookings::{BookingFilter, BookingsRepo},
        resources::ResourcesRepo,
    },
    error::AppError,
    services::context::RequestContext,
    validation::{
        booking::{validate_booking_window, validate_purpose},
        normalize_optional,
    },
};

pub struct BookingsService;

fn conflict_with(existing: &ResourceBooking) -> AppError {
    AppError::conflict_with_code(
        format!(
            "Resource is already booked from {} to {}",
            existing.start_time.to_rfc3339(),
            existing.end_time.to_rfc3339()
        ),
        Some("start_time".to_string()),
        error_codes::BOOKING_CONFLICT,
    )
}

/// Who may move a booking to `target`: admins for review decisions,
/// the owner or an admin for cancellation.
pub fn authorize_status_change(
    ctx: &RequestContext,
    booking: &ResourceBooking,
    target: BookingStatus,
) -> Result<(), AppError> {
    match target {
        BookingStatus::Cancelled => ctx.require_owner_or_admin(booking.user_id),
        _ if ctx.is_admin() => Ok(()),
        _ => Err(AppError::forbidden("Only administrators can review bookings")),
    }
}

/// Existing bookings that keep an already-pending booking from being approved.
const APPROVAL_BLOCKERS: [BookingStatus; 1] = [BookingStatus::Approved];

/// Earliest booking among `candidates` that holds part of `window` in one of
/// `statuses`. `excluding` skips the booking being re-checked.
pub fn first_conflict<'a>(
    window: &BookingWindow,
    candidates: &'a [ResourceBooking],
    statuses: &[BookingStatus],
    excluding: Option<Uuid>,
) -> Option<&'a ResourceBooking> {
    candidates
        .iter()
        .filter(|b| Some(b.id) != excluding)
        .filter(|b| statuses.contains(&b.status))
        .filter(|b| b.window().overlaps(window))
        .min_by_key(|b| b.start_time)
}

pub fn check_transition(from: BookingStatus, to: BookingStatus) -> Result<(), AppError> {
    if from.is_terminal() {
        Err(AppError::rejected(
            format!("Booking is already {} and cannot change", from),
            error_codes::INVALID_TRANSITION,
        ))
    } else if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(AppError::rejected(
            format!("Cannot change booking status from {} to {}", from, to),
            error_codes::INVALID_TRANSITION,
        ))
    }
}

/// Members only ever see their own bookings.
pub fn scoped_filter(ctx: &RequestContext, query: &BookingListQuery) -> BookingFilter {
    BookingFilter {
        resource_id: query.resource_id,
        user_id: if ctx.is_admin() {
            query.user_id
        } else {
            Some(ctx.user_id)
        },
        status: query.status,
    }
}

impl BookingsService {
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        query: &BookingListQuery,
    ) -> Result<Page<ResourceBooking>, AppError> {
        let params = PageParams {
            page: query.page,
            per_page: query.per_page,
        };
        let (items, total) = BookingsRepo::list(conn, &scoped_filter(ctx, query), &params)?;
        Ok(Page {
            items,
            total,
            params,
        })
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> Result<ResourceBooking, AppError> {
        let booking = BookingsRepo::find_by_id(conn, booking_id)?
            .ok_or_else(|| AppError::not_found("Booking"))?;
        ctx.require_owner_or_admin(booking.user_id)?;
        Ok(booking)
    }

    /// Books a resource. The resource row stays locked from the overlap
    /// check until the insert commits, so two requests for the same slot
    /// cannot both succeed.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: CreateBookingRequest,
        max_hours: i64,
    ) -> Result<ResourceBooking, AppError> {
        let window = BookingWindow::new(req.start_time, req.end_time);
        validate_booking_window(&window, Utc::now(), max_hours)?;
        validate_purpose(req.purpose.as_deref())?;
        let purpose = normalize_optional(req.purpose);

        let booking = conn.transaction::<_, AppError, _>(|conn| {
            let resource = ResourcesRepo::lock_by_id(conn, req.resource_id)?
                .filter(|r| r.is_active)
                .ok_or_else(|| AppError::not_found("Resource"))?;

            let blocking = BookingStatus::BLOCKING;
            let candidates = BookingsRepo::find_overlapping(conn, resource.id, &window, &blocking)?;
            if let Some(existing) = first_conflict(&window, &candidates, &blocking, None) {
                return Err(conflict_with(existing));
            }

            let new_booking = NewResourceBooking {
                resource_id: resource.id,
                user_id: ctx.user_id,
                start_time: window.start,
                end_time: window.end,
                purpose,
                status: BookingStatus::initial(resource.requires_approval),
            };
            Ok(BookingsRepo::insert(conn, &new_booking)?)
        })?;

        tracing::info!(
            booking_id = %booking.id,
            resource_id = %booking.resource_id,
            user_id = %booking.user_id,
            status = %booking.status,
            "Booking created"
        );
        Ok(booking)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        booking_id: Uuid,
        req: UpdateBookingStatusRequest,
    ) -> Result<ResourceBooking, AppError> {
        validate_purpose(req.note.as_deref())?;
        let note = normalize_optional(req.note);

        let booking = conn.transaction::<_, AppError, _>(|conn| {
            let booking = BookingsRepo::find_by_id(conn, booking_id)?
                .ok_or_else(|| AppError::not_found("Booking"))?;

            authorize_status_change(ctx, &booking, req.status)?;
            check_transition(booking.status, req.status)?;

            if req.status == BookingStatus::Approved {
                ResourcesRepo::lock_by_id(conn, booking.resource_id)?;
                let window = booking.window();
                let candidates = BookingsRepo::find_overlapping(
                    conn,
                    booking.resource_id,
                    &window,
                    &APPROVAL_BLOCKERS,
                )?;
                if let Some(existing) =
                    first_conflict(&window, &candidates, &APPROVAL_BLOCKERS, Some(booking.id))
                {
                    return Err(conflict_with(existing));
                }
            }

            let review = BookingReview {
                status: req.status,
                review_note: note.or(booking.review_note),
                reviewed_by: Some(ctx.user_id),
                updated_at: Utc::now(),
            };
            Ok(BookingsRepo::apply_review(conn, booking.id, &review)?)
        })?;

        tracing::info!(
            booking_id = %booking.id,
            status = %booking.status,
            actor = %ctx.user_id,
            "Booking status changed"
        );
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::UserRole;
    use axum::http::StatusCode;

    fn booking(owner: Uuid, status: BookingStatus) -> ResourceBooking {
        let now = Utc::now();
        booking_at(owner, status, now, now + chrono::Duration::hours(1))
    }

    fn booking_at(
        owner: Uuid,
        status: BookingStatus,
        start: chrono::DateTime<Utc>,
        end: chrono::DateTime<Utc>,
    ) -> ResourceBooking {
        let now = Utc::now();
        ResourceBooking {
            id: Uuid::new_v4(),
            resource_id: Uuid::new_v4(),
            user_id: owner,
            start_time: start,
            end_time: end,
            purpose: None,
            status,
            review_note: None,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_may_cancel_but_not_approve() {
        let owner = Uuid::new_v4();
        let ctx = RequestContext::new(owner, UserRole::Member);
        let b = booking(owner, BookingStatus::Pending);

        assert!(authorize_status_change(&ctx, &b, BookingStatus::Cancelled).is_ok());
        let err = authorize_status_change(&ctx, &b, BookingStatus::Approved).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn strangers_cannot_cancel() {
        let b = booking(Uuid::new_v4(), BookingStatus::Approved);
        let editor = RequestContext::new(Uuid::new_v4(), UserRole::Editor);
        let admin = RequestContext::new(Uuid::new_v4(), UserRole::Admin);

        assert!(authorize_status_change(&editor, &b, BookingStatus::Cancelled).is_err());
        assert!(authorize_status_change(&admin, &b, BookingStatus::Cancelled).is_ok());
        assert!(authorize_status_change(&admin, &b, BookingStatus::Completed).is_ok());
    }

    #[test]
    fn terminal_states_reject_transitions() {
        let err = check_transition(BookingStatus::Rejected, BookingStatus::Approved).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(check_transition(BookingStatus::Completed, BookingStatus::Cancelled).is_err());
        assert!(check_transition(BookingStatus::Pending, BookingStatus::Completed).is_err());
        assert!(check_transition(BookingStatus::Approved, BookingStatus::Completed).is_ok());
    }

    #[test]
    fn members_are_scoped_to_their_own_bookings() {
        let me = Uuid::new_v4();
        let someone = Uuid::new_v4();
        let query = BookingListQuery {
            user_id: Some(someone),
            ..Default::default()
        };

        let member = RequestContext::new(me, UserRole::Member);
        assert_eq!(scoped_filter(&member, &query).user_id, Some(me));

        let admin = RequestContext::new(me, UserRole::Admin);
        assert_eq!(scoped_filter(&admin, &query).user_id, Some(someone));
        assert_eq!(scoped_filter(&admin, &BookingListQuery::default()).user_id, None);
    }

    #[test]
    fn overlapping_pending_or_approved_booking_conflicts() {
        let hour = chrono::Duration::hours(1);
        let base = Utc::now() + chrono::Duration::days(1);
        let owner = Uuid::new_v4();
        let existing = vec![
            booking_at(owner, BookingStatus::Cancelled, base, base + hour * 4),
            booking_at(owner, BookingStatus::Pending, base + hour * 2, base + hour * 3),
            booking_at(owner, BookingStatus::Approved, base + hour, base + hour * 2),
        ];
        let blocking = BookingStatus::BLOCKING;

        let window = BookingWindow::new(base + hour / 2, base + hour * 5 / 2);
        let hit = first_conflict(&window, &existing, &blocking, None).unwrap();
        assert_eq!(hit.id, existing[2].id);

        let err = conflict_with(hit);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let body = err.to_string();
        assert!(body.contains("already booked"), "{}", body);

        // cancelled bookings free their slot
        let early = BookingWindow::new(base, base + hour);
        assert!(first_conflict(&early, &existing, &blocking, None).is_none());
    }

    #[test]
    fn back_to_back_bookings_do_not_conflict() {
        let hour = chrono::Duration::hours(1);
        let base = Utc::now() + chrono::Duration::days(1);
        let existing = vec![booking_at(
            Uuid::new_v4(),
            BookingStatus::Approved,
            base,
            base + hour,
        )];

        let after = BookingWindow::new(base + hour, base + hour * 2);
        let before = BookingWindow::new(base - hour, base);
        assert!(first_conflict(&after, &existing, &BookingStatus::BLOCKING, None).is_none());
        assert!(first_conflict(&before, &existing, &BookingStatus::BLOCKING, None).is_none());
    }

    #[test]
    fn approval_only_checks_other_approved_bookings() {
        let hour = chrono::Duration::hours(1);
        let base = Utc::now() + chrono::Duration::days(1);
        let owner = Uuid::new_v4();
        let pending = booking_at(owner, BookingStatus::Pending, base, base + hour * 2);
        let rival = booking_at(owner, BookingStatus::Pending, base + hour, base + hour * 3);
        let approved = booking_at(owner, BookingStatus::Approved, base + hour, base + hour * 3);
        let window = pending.window();

        let others = vec![pending.clone(), rival];
        assert!(first_conflict(&window, &others, &APPROVAL_BLOCKERS, Some(pending.id)).is_none());

        let others = vec![pending.clone(), approved.clone()];
        let hit = first_conflict(&window, &others, &APPROVAL_BLOCKERS, Some(pending.id)).unwrap();
        assert_eq!(hit.id, approved.id);
    }
}
