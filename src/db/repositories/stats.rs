use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::db::enums::{BookingStatus, PostStatus};
use crate::db::models::stats::DashboardStats;
use crate::schema::{posts, projects, publications, resource_bookings, resources, users};

pub struct StatsRepo;

impl StatsRepo {
    pub fn dashboard(
        conn: &mut PgConnection,
        now: DateTime<Utc>,
    ) -> Result<DashboardStats, diesel::result::Error> {
        Ok(DashboardStats {
            users: users::table.count().get_result(conn)?,
            publications: publications::table.count().get_result(conn)?,
            projects: projects::table.count().get_result(conn)?,
            published_posts: posts::table
                .filter(posts::status.eq(PostStatus::Published))
                .count()
                .get_result(conn)?,
            draft_posts: posts::table
                .filter(posts::status.eq(PostStatus::Draft))
                .count()
                .get_result(conn)?,
            active_resources: resources::table
                .filter(resources::is_active.eq(true))
                .count()
                .get_result(conn)?,
            pending_bookings: resource_bookings::table
                .filter(resource_bookings::status.eq(BookingStatus::Pending))
                .count()
                .get_result(conn)?,
            upcoming_bookings: resource_bookings::table
                .filter(resource_bookings::status.eq(BookingStatus::Approved))
                .filter(resource_bookings::start_time.gt(now))
                .count()
                .get_result(conn)?,
        })
    }

    pub fn ping(conn: &mut PgConnection) -> Result<(), diesel::result::Error> {
        diesel::sql_query("SELECT 1").execute(conn).map(|_| ())
    }
}
