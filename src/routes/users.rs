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
        auth::{AuthUser, UpdateUserRequest, UserListQuery},
    },
    services::{UsersService, context::RequestContext},
    validation::{ApiJson, ApiPath, ApiQuery},
};

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match UsersService::list(&mut conn, &ctx, &query) {
        Ok(page) => {
            let meta = page.meta();
            let response =
                ApiResponse::success_with_meta(page.items, "Users retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match UsersService::update(&mut conn, &ctx, user_id, &payload) {
        Ok(user) => {
            let response = ApiResponse::success(user, "User updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
