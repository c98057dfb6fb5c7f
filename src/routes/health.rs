use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::{
    AppState, cache,
    db::models::{api::ApiResponse, stats::HealthStatus},
    db::repositories::stats::StatsRepo,
};

fn database_ok(state: &AppState) -> bool {
    match state.db.get() {
        Ok(mut conn) => StatsRepo::ping(&mut conn)
            .map_err(|e| tracing::warn!("Database health check failed: {}", e))
            .is_ok(),
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            false
        }
    }
}

/// 200 when both the database and redis answer, 503 otherwise.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = database_ok(&state);
    let redis = match cache::redis_health_check(&state.redis).await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!("Redis health check failed: {}", e);
            false
        }
    };

    let healthy = database && redis;
    let status = HealthStatus {
        status: if healthy { "ok" } else { "degraded" },
        database,
        redis,
    };

    if healthy {
        (StatusCode::OK, Json(ApiResponse::success(status, "Service is healthy"))).into_response()
    } else {
        let mut response = ApiResponse::service_unavailable("Service is degraded");
        response.data = Some(status);
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
