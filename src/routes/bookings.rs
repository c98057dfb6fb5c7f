use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use super::db_conn;
use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::AuthUser,
        booking::{BookingListQuery, CreateBookingRequest, UpdateBookingStatusRequest},
    },
    services::{BookingsService, context::RequestContext},
    validation::{ApiJson, ApiPath, ApiQuery},
};

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ApiQuery(query): ApiQuery<BookingListQuery>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match BookingsService::list(&mut conn, &ctx, &query) {
        Ok(page) => {
            let meta = page.meta();
            let response =
                ApiResponse::success_with_meta(page.items, "Bookings retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    ApiPath(booking_id): ApiPath<Uuid>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match BookingsService::get(&mut conn, &ctx, booking_id) {
        Ok(booking) => {
            let response = ApiResponse::success(booking, "Booking retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match BookingsService::create(&mut conn, &ctx, payload, state.config.booking_max_hours) {
        Ok(booking) => {
            let response = ApiResponse::created(booking, "Booking created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    ApiPath(booking_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<UpdateBookingStatusRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match BookingsService::update_status(&mut conn, &ctx, booking_id, payload) {
        Ok(booking) => {
            let response = ApiResponse::success(booking, "Booking updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
