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
        auth::{AuthUser, MaybeAuthUser},
        profile::UpdateProfileRequest,
    },
    services::{ProfilesService, context::RequestContext},
    validation::{ApiJson, ApiPath},
};

pub async fn list_profiles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = db_conn!(state);

    match ProfilesService::list_public(&mut conn) {
        Ok(members) => {
            let response = ApiResponse::success(members, "Profiles retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    MaybeAuthUser(viewer): MaybeAuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = viewer.as_ref().map(RequestContext::from);

    match ProfilesService::get(&mut conn, ctx.as_ref(), user_id) {
        Ok(detail) => {
            let response = ApiResponse::success(detail, "Profile retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_my_profile(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match ProfilesService::update_own(&mut conn, &ctx, payload) {
        Ok(profile) => {
            let response = ApiResponse::success(profile, "Profile updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
