use diesel::prelude::*;

use crate::db::enums::UserRole;
use crate::db::models::profile::{MemberSummary, NewProfile, Profile, ProfileChanges};

pub struct ProfilesRepo;

impl ProfilesRepo {
    pub fn insert_default(
        conn: &mut PgConnection,
        owner: uuid::Uuid,
    ) -> Result<Profile, diesel::result::Error> {
        diesel::insert_into(crate::schema::profiles::table)
            .values(&NewProfile { user_id: owner })
            .on_conflict(crate::schema::profiles::user_id)
            .do_nothing()
            .execute(conn)?;
        crate::schema::profiles::table
            .find(owner)
            .select(Profile::as_select())
            .first(conn)
    }

    pub fn find(
        conn: &mut PgConnection,
        owner: uuid::Uuid,
    ) -> Result<Option<Profile>, diesel::result::Error> {
        crate::schema::profiles::table
            .find(owner)
            .select(Profile::as_select())
            .first(conn)
            .optional()
    }

    pub fn replace(
        conn: &mut PgConnection,
        owner: uuid::Uuid,
        changes: &ProfileChanges,
    ) -> Result<Profile, diesel::result::Error> {
        diesel::update(crate::schema::profiles::table.find(owner))
            .set(changes)
            .returning(Profile::as_returning())
            .get_result(conn)
    }

    pub fn list_public_members(
        conn: &mut PgConnection,
    ) -> Result<Vec<MemberSummary>, diesel::result::Error> {
        use crate::schema::{profiles, users};

        let rows = users::table
            .inner_join(profiles::table)
            .filter(users::is_active.eq(true))
            .filter(profiles::is_public.eq(true))
            .order(users::name.asc())
            .select((
                users::id,
                users::name,
                users::role,
                profiles::title,
                profiles::avatar_url,
                profiles::research_interests,
            ))
            .load::<(
                uuid::Uuid,
                String,
                UserRole,
                Option<String>,
                Option<String>,
                Vec<String>,
            )>(conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(user_id, name, role, title, avatar_url, research_interests)| MemberSummary {
                    user_id,
                    name,
                    role,
                    title,
                    avatar_url,
                    research_interests,
                },
            )
            .collect())
    }
}
