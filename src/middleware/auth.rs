use crate::AppState;
use crate::cache;
use crate::config::AuthConfig;
use crate::db::enums::UserRole;
use crate::db::models::auth::AuthUser;
use crate::db::repositories::users::UsersRepo;
use crate::error::AppError;
use axum::{
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub const REFRESH_TOKEN_TYPE: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub email: String,
    pub role: UserRole,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
    pub typ: String,
}

fn now_secs() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// Issues and verifies HS256 tokens, and hashes passwords at the configured cost.
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn access_expires_in(&self) -> u64 {
        self.config.access_token_expires_in
    }

    pub fn generate_access_token(&self, user: &AuthUser) -> Result<String, AppError> {
        let now = now_secs();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: now + self.config.access_token_expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?)
    }

    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = now_secs();
        let claims = RefreshClaims {
            sub: user_id,
            exp: now + self.config.refresh_token_expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
            typ: REFRESH_TOKEN_TYPE.to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let token_data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        if token_data.claims.typ != REFRESH_TOKEN_TYPE {
            return Err(AppError::auth("Not a refresh token"));
        }
        Ok(token_data.claims)
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        Ok(bcrypt::hash(password, self.config.bcrypt_cost)?)
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        Ok(bcrypt::verify(password, hash)?)
    }

    /// HttpOnly cookie carrying the access token.
    pub fn auth_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(self.config.cookie_name.clone(), token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.cookie_secure)
            .finish()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build(self.config.cookie_name.clone(), "")
            .path("/")
            .finish()
    }
}

/// Bearer header first, then the auth cookie.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

async fn resolve_user(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let claims = state.tokens.verify_token(token)?;

    if cache::is_token_revoked(&state.redis, &claims.jti).await? {
        return Err(AppError::auth("Token has been revoked"));
    }

    let mut conn = state.db.get()?;
    let user = UsersRepo::find_active_by_id(&mut conn, claims.sub)?
        .ok_or_else(|| AppError::auth("User not found or inactive"))?;

    let mut auth_user = AuthUser::from(&user);
    auth_user.token_id = Some(claims.jti);
    auth_user.token_expires_at = Some(claims.exp);
    Ok(auth_user)
}

/// Attaches an `AuthUser` to the request when a valid token is present.
/// Requests without one continue anonymously; routes that need a user
/// reject them through the extractor.
pub async fn optional_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Response {
    let token = extract_token(request.headers(), &state.tokens.config().cookie_name);

    if let Some(token) = token {
        match resolve_user(&state, &token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring unusable credentials");
            }
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn service() -> TokenService {
        TokenService::new(AuthConfig {
            jwt_secret: "unit-test-secret-0123456789".to_string(),
            access_token_expires_in: 3600,
            refresh_token_expires_in: 7200,
            cookie_name: "auth_token".to_string(),
            cookie_secure: false,
            bcrypt_cost: 4,
        })
    }

    fn user() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "ada@lab.org".to_string(),
            name: "Ada".to_string(),
            role: UserRole::Editor,
            token_id: None,
            token_expires_at: None,
        }
    }

    #[test]
    fn access_token_round_trip() {
        let tokens = service();
        let user = user();
        let token = tokens.generate_access_token(&user).unwrap();
        let claims = tokens.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Editor);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_and_access_tokens_are_not_interchangeable() {
        let tokens = service();
        let user = user();
        let access = tokens.generate_access_token(&user).unwrap();
        let refresh = tokens.generate_refresh_token(user.id).unwrap();

        assert!(tokens.verify_refresh_token(&access).is_err());
        assert!(tokens.verify_token(&refresh).is_err());
        assert!(tokens.verify_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn rejects_foreign_signature() {
        let token = service().generate_access_token(&user()).unwrap();
        let other = TokenService::new(AuthConfig {
            jwt_secret: "a-completely-different-secret".to_string(),
            ..service().config().clone()
        });
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn password_hashing() {
        let tokens = service();
        let hash = tokens.hash_password("Sup3rSecret!").unwrap();
        assert!(tokens.verify_password("Sup3rSecret!", &hash).unwrap());
        assert!(!tokens.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn token_from_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("auth_token=from-cookie"));
        assert_eq!(extract_token(&headers, "auth_token").as_deref(), Some("from-cookie"));

        headers.insert("authorization", HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_token(&headers, "auth_token").as_deref(), Some("from-header"));
    }

    #[test]
    fn no_token_without_credentials() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers, "auth_token").is_none());
    }

    #[test]
    fn auth_cookie_is_http_only() {
        let cookie = service().auth_cookie("tok".to_string());
        assert_eq!(cookie.name(), "auth_token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
}
