use chrono::Utc;
use diesel::prelude::*;

use crate::{
    db::enums::UserRole,
    db::models::api::error_codes,
    db::models::auth::{
        AuthUser, LoginRequest, LoginResponse, NewUser, RefreshResponse, RegisterRequest, User,
        UserChanges, UserInfo,
    },
    db::models::profile::CurrentUser,
    db::repositories::{profiles::ProfilesRepo, users::UsersRepo},
    error::AppError,
    middleware::auth::{RefreshClaims, TokenService},
    services::context::RequestContext,
    validation::auth::{validate_login_request, validate_register_request},
};

pub const TOKEN_TYPE: &str = "Bearer";

pub struct AuthService;

impl AuthService {
    /// New accounts always start as members with an empty profile.
    pub fn register(
        conn: &mut PgConnection,
        tokens: &TokenService,
        req: &RegisterRequest,
    ) -> Result<UserInfo, AppError> {
        validate_register_request(&req.name, &req.email, &req.password)?;

        let email = req.email.trim().to_lowercase();
        if UsersRepo::exists_by_email(conn, &email)? {
            return Err(AppError::conflict_with_code(
                "Email address already exists",
                Some("email".to_string()),
                error_codes::USER_EMAIL_EXISTS,
            ));
        }

        let password_hash = tokens.hash_password(&req.password)?;
        let new_user = NewUser {
            email,
            name: req.name.trim().to_string(),
            password_hash,
            role: UserRole::Member,
        };

        let user = conn.transaction::<_, AppError, _>(|conn| {
            let user = UsersRepo::insert(conn, &new_user)?;
            ProfilesRepo::insert_default(conn, user.id)?;
            Ok(user)
        })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(UserInfo::from(user))
    }

    pub fn login(
        conn: &mut PgConnection,
        tokens: &TokenService,
        req: &LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        validate_login_request(&req.email, &req.password)?;

        let invalid = || AppError::auth("Invalid email or password");

        let user = UsersRepo::find_by_email(conn, req.email.trim())?.ok_or_else(invalid)?;
        if !tokens.verify_password(&req.password, &user.password_hash)? {
            return Err(invalid());
        }
        if !user.is_active {
            return Err(AppError::auth("Account is disabled"));
        }

        let auth_user = AuthUser::from(&user);
        let access_token = tokens.generate_access_token(&auth_user)?;
        let refresh_token = tokens.generate_refresh_token(user.id)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: tokens.access_expires_in(),
            user: UserInfo::from(user),
        })
    }

    /// Issues a new access token for already verified refresh claims.
    pub fn refresh(
        conn: &mut PgConnection,
        tokens: &TokenService,
        claims: &RefreshClaims,
    ) -> Result<RefreshResponse, AppError> {
        let user = UsersRepo::find_active_by_id(conn, claims.sub)?
            .ok_or_else(|| AppError::auth("User not found or inactive"))?;

        let access_token = tokens.generate_access_token(&AuthUser::from(&user))?;
        Ok(RefreshResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: tokens.access_expires_in(),
        })
    }

    pub fn current_user(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<CurrentUser, AppError> {
        let user = UsersRepo::find_by_id(conn, ctx.user_id)?
            .ok_or_else(|| AppError::not_found("User"))?;
        let profile = ProfilesRepo::find(conn, ctx.user_id)?;
        Ok(CurrentUser {
            user: UserInfo::from(user),
            profile,
        })
    }

    /// Creates an admin account, or promotes and re-keys an existing one.
    pub fn create_admin(
        conn: &mut PgConnection,
        tokens: &TokenService,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, AppError> {
        validate_register_request(name, email, password)?;
        let password_hash = tokens.hash_password(password)?;
        let email = email.trim().to_lowercase();

        conn.transaction::<_, AppError, _>(|conn| {
            let user = match UsersRepo::find_by_email(conn, &email)? {
                Some(existing) => UsersRepo::update(
                    conn,
                    existing.id,
                    &UserChanges {
                        role: Some(UserRole::Admin),
                        is_active: Some(true),
                        password_hash: Some(password_hash),
                        updated_at: Some(Utc::now()),
                    },
                )?,
                None => UsersRepo::insert(
                    conn,
                    &NewUser {
                        email,
                        name: name.trim().to_string(),
                        password_hash,
                        role: UserRole::Admin,
                    },
                )?,
            };
            ProfilesRepo::insert_default(conn, user.id)?;
            Ok(user)
        })
    }
}
