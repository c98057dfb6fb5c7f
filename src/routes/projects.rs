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
        project::{ProjectListQuery, ProjectPatch, ProjectRequest},
    },
    services::{ProjectsService, context::RequestContext},
    validation::{ApiJson, ApiPath, ApiQuery},
};

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ProjectListQuery>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);

    match ProjectsService::list(&mut conn, &query) {
        Ok(page) => {
            let meta = page.meta();
            let response =
                ApiResponse::success_with_meta(page.items, "Projects retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    ApiPath(project_id): ApiPath<Uuid>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);

    match ProjectsService::get(&mut conn, project_id) {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_project_by_slug(
    State(state): State<Arc<AppState>>,
    ApiPath(slug): ApiPath<String>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);

    match ProjectsService::get_by_slug(&mut conn, &slug) {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<ProjectRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match ProjectsService::create(&mut conn, &ctx, payload) {
        Ok(project) => {
            let response = ApiResponse::created(project, "Project created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn replace_project(
    State(state): State<Arc<AppState>>,
    ApiPath(project_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<ProjectRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match ProjectsService::replace(&mut conn, &ctx, project_id, payload) {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn patch_project(
    State(state): State<Arc<AppState>>,
    ApiPath(project_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<ProjectPatch>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match ProjectsService::patch(&mut conn, &ctx, project_id, payload) {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    ApiPath(project_id): ApiPath<Uuid>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match ProjectsService::delete(&mut conn, &ctx, project_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Project deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
