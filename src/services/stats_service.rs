use chrono::Utc;
use diesel::prelude::*;

use crate::{
    db::enums::UserRole,
    db::models::stats::DashboardStats,
    db::repositories::stats::StatsRepo,
    error::AppError,
    services::context::RequestContext,
};

pub struct StatsService;

impl StatsService {
    pub fn dashboard(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<DashboardStats, AppError> {
        ctx.require_role(UserRole::Editor)?;
        Ok(StatsRepo::dashboard(conn, Utc::now())?)
    }
}
