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
        resource::{AvailabilityQuery, ResourceListQuery, ResourceRequest},
    },
    services::{ResourcesService, context::RequestContext},
    validation::{ApiJson, ApiPath, ApiQuery},
};

pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    ApiQuery(query): ApiQuery<ResourceListQuery>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = viewer.as_ref().map(RequestContext::from);

    match ResourcesService::list(&mut conn, ctx.as_ref(), &query) {
        Ok(resources) => {
            let response = ApiResponse::success(resources, "Resources retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_resource(
    State(state): State<Arc<AppState>>,
    ApiPath(resource_id): ApiPath<Uuid>,
    MaybeAuthUser(viewer): MaybeAuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = viewer.as_ref().map(RequestContext::from);

    match ResourcesService::get(&mut conn, ctx.as_ref(), resource_id) {
        Ok(resource) => {
            let response = ApiResponse::success(resource, "Resource retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    ApiPath(resource_id): ApiPath<Uuid>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = viewer.as_ref().map(RequestContext::from);

    match ResourcesService::availability(&mut conn, ctx.as_ref(), resource_id, &query) {
        Ok(bookings) => {
            let response = ApiResponse::success(bookings, "Availability retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<ResourceRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match ResourcesService::create(&mut conn, &ctx, payload) {
        Ok(resource) => {
            let response = ApiResponse::created(resource, "Resource created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn replace_resource(
    State(state): State<Arc<AppState>>,
    ApiPath(resource_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<ResourceRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match ResourcesService::replace(&mut conn, &ctx, resource_id, payload) {
        Ok(resource) => {
            let response = ApiResponse::success(resource, "Resource updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_resource(
    State(state): State<Arc<AppState>>,
    ApiPath(resource_id): ApiPath<Uuid>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match ResourcesService::delete(&mut conn, &ctx, resource_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Resource deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
