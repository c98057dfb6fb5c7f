use chrono::Utc;
use diesel::prelude::*;

use crate::{
    db::enums::UserRole,
    db::models::api::{Page, PageParams},
    db::models::auth::{UpdateUserRequest, UserChanges, UserInfo, UserListQuery},
    db::repositories::users::UsersRepo,
    error::AppError,
    services::context::RequestContext,
};

pub struct UsersService;

impl UsersService {
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        query: &UserListQuery,
    ) -> Result<Page<UserInfo>, AppError> {
        ctx.require_role(UserRole::Admin)?;

        let params = PageParams {
            page: query.page,
            per_page: query.per_page,
        };
        let (users, total) = UsersRepo::list(conn, query.search.as_deref(), &params)?;
        Ok(Page {
            items: users.into_iter().map(UserInfo::from).collect(),
            total,
            params,
        })
    }

    /// Role and activation changes. Admins cannot lock themselves out.
    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        user_id: uuid::Uuid,
        req: &UpdateUserRequest,
    ) -> Result<UserInfo, AppError> {
        ctx.require_role(UserRole::Admin)?;

        if req.role.is_none() && req.is_active.is_none() {
            return Err(AppError::validation("Nothing to update"));
        }

        if user_id == ctx.user_id {
            if req.role.is_some_and(|r| r != UserRole::Admin) {
                return Err(AppError::validation("You cannot change your own role"));
            }
            if req.is_active == Some(false) {
                return Err(AppError::validation("You cannot deactivate your own account"));
            }
        }

        if UsersRepo::find_by_id(conn, user_id)?.is_none() {
            return Err(AppError::not_found("User"));
        }

        let changes = UserChanges {
            role: req.role,
            is_active: req.is_active,
            password_hash: None,
            updated_at: Some(Utc::now()),
        };
        let user = UsersRepo::update(conn, user_id, &changes)?;

        tracing::info!(
            actor = %ctx.user_id,
            user_id = %user.id,
            role = %user.role,
            is_active = user.is_active,
            "User updated"
        );
        Ok(UserInfo::from(user))
    }
}
