use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use lab_portal::db::enums::{BookingStatus, ResourceCategory, UserRole};
use lab_portal::db::models::api::error_codes;
use lab_portal::db::models::auth::NewUser;
use lab_portal::db::models::booking::{
    CreateBookingRequest, NewResourceBooking, ResourceBooking, UpdateBookingStatusRequest,
};
use lab_portal::db::models::resource::{NewResource, Resource};
use lab_portal::db::repositories::bookings::BookingsRepo;
use lab_portal::db::repositories::resources::ResourcesRepo;
use lab_portal::db::repositories::users::UsersRepo;
use lab_portal::error::AppError;
use lab_portal::services::context::RequestContext;
use lab_portal::services::{BookingsService, ResourcesService};

const MAX_HOURS: i64 = 72;

/// Connection whose work is rolled back when it drops.
fn connection() -> PgConnection {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let mut conn = PgConnection::establish(&url).expect("Failed to connect to database");
    conn.begin_test_transaction()
        .expect("Failed to open test transaction");
    conn
}

fn member(conn: &mut PgConnection, role: UserRole) -> RequestContext {
    let user = UsersRepo::insert(
        conn,
        &NewUser {
            email: format!("booker-{}@lab.test", Uuid::new_v4().simple()),
            name: "Booking Tester".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role,
        },
    )
    .expect("insert user");
    RequestContext::new(user.id, role)
}

fn microscope(conn: &mut PgConnection, requires_approval: bool) -> Resource {
    ResourcesRepo::insert(
        conn,
        &NewResource {
            name: format!("Microscope {}", Uuid::new_v4().simple()),
            description: None,
            category: ResourceCategory::Equipment,
            location: Some("Room 101".to_string()),
            requires_approval,
            is_active: true,
        },
    )
    .expect("insert resource")
}

fn tomorrow_at(hour: i64) -> DateTime<Utc> {
    let midnight = (Utc::now() + Duration::days(1))
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    midnight + Duration::hours(hour)
}

fn request(resource: &Resource, from: i64, to: i64) -> CreateBookingRequest {
    CreateBookingRequest {
        resource_id: resource.id,
        start_time: tomorrow_at(from),
        end_time: tomorrow_at(to),
        purpose: Some("Imaging run".to_string()),
    }
}

fn stored(
    conn: &mut PgConnection,
    resource: &Resource,
    ctx: &RequestContext,
    status: BookingStatus,
    from: i64,
    to: i64,
) -> ResourceBooking {
    BookingsRepo::insert(
        conn,
        &NewResourceBooking {
            resource_id: resource.id,
            user_id: ctx.user_id,
            start_time: tomorrow_at(from),
            end_time: tomorrow_at(to),
            purpose: None,
            status,
        },
    )
    .expect("insert booking")
}

fn assert_conflict(err: AppError, expected: &str) {
    match err {
        AppError::Conflict { code, .. } => assert_eq!(code.as_deref(), Some(expected)),
        other => panic!("expected {} conflict, got {:?}", expected, other),
    }
}

#[test]
#[ignore = "requires database"]
fn overlapping_request_is_refused() {
    let mut conn = connection();
    let alice = member(&mut conn, UserRole::Member);
    let bob = member(&mut conn, UserRole::Member);
    let scope = microscope(&mut conn, true);

    let first = BookingsService::create(&mut conn, &alice, request(&scope, 9, 11), MAX_HOURS)
        .expect("first booking");
    assert_eq!(first.status, BookingStatus::Pending);

    // a pending booking already holds the slot
    let err = BookingsService::create(&mut conn, &bob, request(&scope, 10, 12), MAX_HOURS)
        .unwrap_err();
    assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    assert_conflict(err, error_codes::BOOKING_CONFLICT);

    let err = BookingsService::create(&mut conn, &bob, request(&scope, 8, 12), MAX_HOURS)
        .unwrap_err();
    assert_conflict(err, error_codes::BOOKING_CONFLICT);
}

#[test]
#[ignore = "requires database"]
fn back_to_back_requests_are_accepted() {
    let mut conn = connection();
    let alice = member(&mut conn, UserRole::Member);
    let scope = microscope(&mut conn, false);

    let morning = BookingsService::create(&mut conn, &alice, request(&scope, 9, 11), MAX_HOURS)
        .expect("morning booking");
    assert_eq!(morning.status, BookingStatus::Approved);

    let noon = BookingsService::create(&mut conn, &alice, request(&scope, 11, 12), MAX_HOURS)
        .expect("adjacent booking");
    let early = BookingsService::create(&mut conn, &alice, request(&scope, 8, 9), MAX_HOURS)
        .expect("booking ending at the next start");
    assert_eq!(noon.start_time, morning.end_time);
    assert_eq!(early.end_time, morning.start_time);
}

#[test]
#[ignore = "requires database"]
fn cancelled_booking_frees_its_slot() {
    let mut conn = connection();
    let alice = member(&mut conn, UserRole::Member);
    let scope = microscope(&mut conn, true);
    stored(&mut conn, &scope, &alice, BookingStatus::Cancelled, 9, 11);
    stored(&mut conn, &scope, &alice, BookingStatus::Rejected, 9, 11);

    let booking = BookingsService::create(&mut conn, &alice, request(&scope, 9, 11), MAX_HOURS)
        .expect("slot is free again");
    assert_eq!(booking.status, BookingStatus::Pending);
}

#[test]
#[ignore = "requires database"]
fn approving_into_an_approved_slot_is_refused() {
    let mut conn = connection();
    let admin = member(&mut conn, UserRole::Admin);
    let alice = member(&mut conn, UserRole::Member);
    let bob = member(&mut conn, UserRole::Member);
    let scope = microscope(&mut conn, true);

    stored(&mut conn, &scope, &alice, BookingStatus::Approved, 9, 11);
    let pending = stored(&mut conn, &scope, &bob, BookingStatus::Pending, 10, 12);
    let approve = || UpdateBookingStatusRequest {
        status: BookingStatus::Approved,
        note: None,
    };

    let err =
        BookingsService::update_status(&mut conn, &admin, pending.id, approve()).unwrap_err();
    assert_conflict(err, error_codes::BOOKING_CONFLICT);
    let unchanged = BookingsRepo::find_by_id(&mut conn, pending.id).unwrap().unwrap();
    assert_eq!(unchanged.status, BookingStatus::Pending);

    // a rival pending request does not block approval
    let later = stored(&mut conn, &scope, &bob, BookingStatus::Pending, 13, 15);
    stored(&mut conn, &scope, &alice, BookingStatus::Pending, 14, 16);
    let approved = BookingsService::update_status(&mut conn, &admin, later.id, approve())
        .expect("approve later booking");
    assert_eq!(approved.status, BookingStatus::Approved);
    assert_eq!(approved.reviewed_by, Some(admin.user_id));
}

#[test]
#[ignore = "requires database"]
fn resource_with_upcoming_bookings_cannot_be_deleted() {
    let mut conn = connection();
    let admin = member(&mut conn, UserRole::Admin);
    let alice = member(&mut conn, UserRole::Member);
    let busy = microscope(&mut conn, true);
    let idle = microscope(&mut conn, true);

    BookingsService::create(&mut conn, &alice, request(&busy, 9, 10), MAX_HOURS)
        .expect("booking");
    stored(&mut conn, &idle, &alice, BookingStatus::Cancelled, 9, 10);

    let err = ResourcesService::delete(&mut conn, &admin, busy.id).unwrap_err();
    assert_conflict(err, error_codes::RESOURCE_IN_USE);
    assert!(ResourcesRepo::find_by_id(&mut conn, busy.id).unwrap().is_some());

    ResourcesService::delete(&mut conn, &admin, idle.id).expect("delete idle resource");
    assert!(ResourcesRepo::find_by_id(&mut conn, idle.id).unwrap().is_none());
}
