use diesel::prelude::*;

use super::like_pattern;
use crate::db::models::api::PageParams;
use crate::db::models::auth::{NewUser, User, UserChanges};

pub struct UsersRepo;

impl UsersRepo {
    pub fn find_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(target_email.to_lowercase()))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_active_by_id(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .find(user_id)
            .filter(is_active.eq(true))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(
            users.filter(email.eq(target_email.to_lowercase())),
        ))
        .get_result(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
        changes: &UserChanges,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.find(user_id))
            .set(changes)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn list(
        conn: &mut PgConnection,
        search: Option<&str>,
        params: &PageParams,
    ) -> Result<(Vec<User>, i64), diesel::result::Error> {
        use crate::schema::users::dsl::*;

        let filtered = || {
            let mut query: crate::schema::users::BoxedQuery<'_, diesel::pg::Pg> =
                users.into_boxed();
            if let Some(term) = search.filter(|s| !s.trim().is_empty()) {
                let pattern = like_pattern(term);
                query = query.filter(name.ilike(pattern.clone()).or(email.ilike(pattern)));
            }
            query
        };

        let total = filtered().count().get_result::<i64>(conn)?;
        let items = filtered()
            .order(created_at.desc())
            .limit(params.per_page())
            .offset(params.offset())
            .select(User::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
