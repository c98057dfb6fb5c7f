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
        announcement::{AnnouncementQuery, AnnouncementRequest},
        api::ApiResponse,
        auth::{AuthUser, MaybeAuthUser},
    },
    services::{AnnouncementsService, context::RequestContext},
    validation::{ApiJson, ApiPath, ApiQuery},
};

pub async fn list_announcements(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    ApiQuery(query): ApiQuery<AnnouncementQuery>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = viewer.as_ref().map(RequestContext::from);

    match AnnouncementsService::list(&mut conn, ctx.as_ref(), query.all.unwrap_or(false)) {
        Ok(announcements) => {
            let response =
                ApiResponse::success(announcements, "Announcements retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_announcement(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<AnnouncementRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match AnnouncementsService::create(&mut conn, &ctx, payload) {
        Ok(announcement) => {
            let response = ApiResponse::created(announcement, "Announcement created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn replace_announcement(
    State(state): State<Arc<AppState>>,
    ApiPath(announcement_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<AnnouncementRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match AnnouncementsService::replace(&mut conn, &ctx, announcement_id, payload) {
        Ok(announcement) => {
            let response = ApiResponse::success(announcement, "Announcement updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_announcement(
    State(state): State<Arc<AppState>>,
    ApiPath(announcement_id): ApiPath<Uuid>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match AnnouncementsService::delete(&mut conn, &ctx, announcement_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Announcement deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
