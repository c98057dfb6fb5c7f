use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tokio::task;

use super::db_conn;
use crate::{
    AppState, cache,
    db::models::{
        api::ApiResponse,
        auth::{AuthUser, LoginRequest, MaybeAuthUser, RefreshTokenRequest, RegisterRequest},
    },
    error::AppError,
    services::{AuthService, context::RequestContext},
    validation::ValidatedJson,
};

/// Seconds until `exp`, floored at zero.
fn remaining_ttl(exp: u64) -> u64 {
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    exp.saturating_sub(now)
}

/// Runs `op` on the blocking pool. Password hashing and verification go
/// through here so bcrypt never stalls a runtime worker.
async fn off_runtime<T, F>(op: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    match task::spawn_blocking(op).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Blocking auth task failed: {}", e);
            Err(AppError::internal("Authentication task failed"))
        }
    }
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> impl IntoResponse {
    let result = off_runtime(move || {
        let mut conn = state.db.get()?;
        AuthService::register(&mut conn, &state.tokens, &payload)
    })
    .await;

    match result {
        Ok(user) => {
            let response = ApiResponse::created(user, "User registered successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    let worker_state = Arc::clone(&state);
    let result = off_runtime(move || {
        let mut conn = worker_state.db.get()?;
        AuthService::login(&mut conn, &worker_state.tokens, &payload)
    })
    .await;

    match result {
        Ok(login) => {
            let jar = jar.add(state.tokens.auth_cookie(login.access_token.clone()));
            let response = ApiResponse::success(login, "Login successful");
            (StatusCode::OK, jar, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> impl IntoResponse {
    let claims = match state.tokens.verify_refresh_token(&payload.refresh_token) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    match cache::is_token_revoked(&state.redis, &claims.jti).await {
        Ok(false) => {}
        Ok(true) => return AppError::auth("Refresh token has been revoked").into_response(),
        Err(err) => return err.into_response(),
    }

    let mut conn = db_conn!(state);

    match AuthService::refresh(&mut conn, &state.tokens, &claims) {
        Ok(refreshed) => {
            let jar = jar.add(state.tokens.auth_cookie(refreshed.access_token.clone()));
            let response = ApiResponse::success(refreshed, "Token refreshed successfully");
            (StatusCode::OK, jar, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Revokes the presented access token (and refresh token, when one is
/// sent) and clears the cookie. Anonymous callers just get the cookie cleared.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(auth_user): MaybeAuthUser,
    jar: CookieJar,
    payload: Option<Json<RefreshTokenRequest>>,
) -> impl IntoResponse {
    if let Some(user) = auth_user {
        if let (Some(jti), Some(exp)) = (user.token_id.as_deref(), user.token_expires_at) {
            if let Err(err) = cache::revoke_token(&state.redis, jti, remaining_ttl(exp)).await {
                return err.into_response();
            }
        }

        if let Some(Json(body)) = payload {
            if let Ok(claims) = state.tokens.verify_refresh_token(&body.refresh_token) {
                if claims.sub == user.id {
                    let ttl = remaining_ttl(claims.exp);
                    if let Err(err) = cache::revoke_token(&state.redis, &claims.jti, ttl).await {
                        return err.into_response();
                    }
                }
            }
        }

        tracing::info!(user_id = %user.id, "User logged out");
    }

    let jar = jar.remove(state.tokens.removal_cookie());
    let response = ApiResponse::<()>::ok("Logged out successfully");
    (StatusCode::OK, jar, Json(response)).into_response()
}

pub async fn me(State(state): State<Arc<AppState>>, auth_user: AuthUser) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = RequestContext::from(&auth_user);

    match AuthService::current_user(&mut conn, &ctx) {
        Ok(current) => {
            let response = ApiResponse::success(current, "Current user retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_never_underflows() {
        assert_eq!(remaining_ttl(0), 0);
        let future = chrono::Utc::now().timestamp() as u64 + 120;
        let ttl = remaining_ttl(future);
        assert!(ttl > 100 && ttl <= 120);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn blocking_work_leaves_the_runtime_thread() {
        let caller = std::thread::current().id();
        let worker = off_runtime(|| Ok(std::thread::current().id())).await.unwrap();
        assert_ne!(worker, caller);

        let err = off_runtime(|| Err::<(), _>(AppError::auth("Invalid email or password")))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
