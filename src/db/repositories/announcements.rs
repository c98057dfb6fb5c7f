use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::db::models::announcement::{Announcement, AnnouncementReplace, NewAnnouncement};
use crate::schema::announcements;

pub struct AnnouncementsRepo;

impl AnnouncementsRepo {
    pub fn list_active(
        conn: &mut PgConnection,
        now: DateTime<Utc>,
    ) -> Result<Vec<Announcement>, diesel::result::Error> {
        use crate::schema::announcements::dsl::*;
        announcements
            .filter(starts_at.le(now))
            .filter(expires_at.is_null().or(expires_at.gt(now)))
            .order(starts_at.desc())
            .select(Announcement::as_select())
            .load(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Announcement>, diesel::result::Error> {
        use crate::schema::announcements::dsl::*;
        announcements
            .order(starts_at.desc())
            .select(Announcement::as_select())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        announcement_id: uuid::Uuid,
    ) -> Result<Option<Announcement>, diesel::result::Error> {
        announcements::table
            .find(announcement_id)
            .select(Announcement::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_announcement: &NewAnnouncement,
    ) -> Result<Announcement, diesel::result::Error> {
        diesel::insert_into(announcements::table)
            .values(new_announcement)
            .returning(Announcement::as_returning())
            .get_result(conn)
    }

    pub fn replace(
        conn: &mut PgConnection,
        announcement_id: uuid::Uuid,
        replacement: &AnnouncementReplace,
    ) -> Result<Announcement, diesel::result::Error> {
        diesel::update(announcements::table.find(announcement_id))
            .set(replacement)
            .returning(Announcement::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        announcement_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(announcements::table.find(announcement_id)).execute(conn)
    }
}
