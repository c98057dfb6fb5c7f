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
        post::{PostListQuery, PostPatch, PostRequest},
    },
    services::{PostsService, context::RequestContext},
    validation::{ApiJson, ApiPath, ApiQuery},
};

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    ApiQuery(query): ApiQuery<PostListQuery>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = viewer.as_ref().map(RequestContext::from);

    match PostsService::list(&mut conn, ctx.as_ref(), &query) {
        Ok(page) => {
            let meta = page.meta();
            let response =
                ApiResponse::success_with_meta(page.items, "Posts retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    ApiPath(post_id): ApiPath<Uuid>,
    MaybeAuthUser(viewer): MaybeAuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = viewer.as_ref().map(RequestContext::from);

    match PostsService::get(&mut conn, ctx.as_ref(), post_id) {
        Ok(post) => {
            let response = ApiResponse::success(post, "Post retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_post_by_slug(
    State(state): State<Arc<AppState>>,
    ApiPath(slug): ApiPath<String>,
    MaybeAuthUser(viewer): MaybeAuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = viewer.as_ref().map(RequestContext::from);

    match PostsService::get_by_slug(&mut conn, ctx.as_ref(), &slug) {
        Ok(post) => {
            let response = ApiResponse::success(post, "Post retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<PostRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match PostsService::create(&mut conn, &ctx, payload) {
        Ok(post) => {
            let response = ApiResponse::created(post, "Post created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn replace_post(
    State(state): State<Arc<AppState>>,
    ApiPath(post_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<PostRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match PostsService::replace(&mut conn, &ctx, post_id, payload) {
        Ok(post) => {
            let response = ApiResponse::success(post, "Post updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn patch_post(
    State(state): State<Arc<AppState>>,
    ApiPath(post_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<PostPatch>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match PostsService::patch(&mut conn, &ctx, post_id, payload) {
        Ok(post) => {
            let response = ApiResponse::success(post, "Post updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    ApiPath(post_id): ApiPath<Uuid>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match PostsService::delete(&mut conn, &ctx, post_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Post deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
