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
        publication::{PublicationPatch, PublicationQuery, PublicationRequest},
    },
    services::{PublicationsService, context::RequestContext},
    validation::{ApiJson, ApiPath, ApiQuery},
};

pub async fn list_papers(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<PublicationQuery>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);

    match PublicationsService::list(&mut conn, &query) {
        Ok(page) => {
            let meta = page.meta();
            let response = ApiResponse::success_with_meta(
                page.items,
                "Publications retrieved successfully",
                meta,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_paper(
    State(state): State<Arc<AppState>>,
    ApiPath(paper_id): ApiPath<Uuid>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);

    match PublicationsService::get(&mut conn, paper_id) {
        Ok(publication) => {
            let response = ApiResponse::success(publication, "Publication retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_paper(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<PublicationRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match PublicationsService::create(&mut conn, &ctx, payload) {
        Ok(publication) => {
            let response = ApiResponse::created(publication, "Publication created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn replace_paper(
    State(state): State<Arc<AppState>>,
    ApiPath(paper_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<PublicationRequest>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match PublicationsService::replace(&mut conn, &ctx, paper_id, payload) {
        Ok(publication) => {
            let response = ApiResponse::success(publication, "Publication updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn patch_paper(
    State(state): State<Arc<AppState>>,
    ApiPath(paper_id): ApiPath<Uuid>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<PublicationPatch>,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match PublicationsService::patch(&mut conn, &ctx, paper_id, payload) {
        Ok(publication) => {
            let response = ApiResponse::success(publication, "Publication updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_paper(
    State(state): State<Arc<AppState>>,
    ApiPath(paper_id): ApiPath<Uuid>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match PublicationsService::delete(&mut conn, &ctx, paper_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Publication deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
