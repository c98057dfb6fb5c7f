use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use super::db_conn;
use crate::{
    AppState,
    db::models::{api::ApiResponse, auth::AuthUser},
    services::{StatsService, context::RequestContext},
};

pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match StatsService::dashboard(&mut conn, &ctx) {
        Ok(stats) => {
            let response =
                ApiResponse::success(stats, "Dashboard statistics retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
