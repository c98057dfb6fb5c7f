use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::UserRole,
    db::models::announcement::{
        Announcement, AnnouncementReplace, AnnouncementRequest, NewAnnouncement,
    },
    db::repositories::announcements::AnnouncementsRepo,
    error::AppError,
    services::context::RequestContext,
    validation::announcement::validate_announcement,
};

pub struct AnnouncementsService;

/// Rows arrive newest start first; the stable sort keeps that within a priority.
fn by_priority(mut items: Vec<Announcement>) -> Vec<Announcement> {
    items.sort_by(|a, b| b.priority.cmp(&a.priority));
    items
}

impl AnnouncementsService {
    /// Currently active announcements, or every announcement when an editor
    /// asks for all. Highest priority first, then newest start.
    pub fn list(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        include_all: bool,
    ) -> Result<Vec<Announcement>, AppError> {
        if include_all {
            match viewer {
                Some(ctx) => ctx.require_role(UserRole::Editor)?,
                None => return Err(AppError::auth("Authentication required")),
            }
            return Ok(by_priority(AnnouncementsRepo::list_all(conn)?));
        }
        Ok(by_priority(AnnouncementsRepo::list_active(conn, Utc::now())?))
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: AnnouncementRequest,
    ) -> Result<Announcement, AppError> {
        ctx.require_role(UserRole::Editor)?;
        let starts_at = req.starts_at.unwrap_or_else(Utc::now);
        validate_announcement(&req.title, &req.body, starts_at, req.expires_at)?;

        let new_announcement = NewAnnouncement {
            title: req.title.trim().to_string(),
            body: req.body,
            priority: req.priority,
            starts_at,
            expires_at: req.expires_at,
            created_by: ctx.user_id,
        };
        Ok(AnnouncementsRepo::insert(conn, &new_announcement)?)
    }

    pub fn replace(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        announcement_id: Uuid,
        req: AnnouncementRequest,
    ) -> Result<Announcement, AppError> {
        ctx.require_role(UserRole::Editor)?;
        let current = AnnouncementsRepo::find_by_id(conn, announcement_id)?
            .ok_or_else(|| AppError::not_found("Announcement"))?;

        let starts_at = req.starts_at.unwrap_or(current.starts_at);
        validate_announcement(&req.title, &req.body, starts_at, req.expires_at)?;

        let replacement = AnnouncementReplace {
            title: req.title.trim().to_string(),
            body: req.body,
            priority: req.priority,
            starts_at,
            expires_at: req.expires_at,
            updated_at: Utc::now(),
        };
        Ok(AnnouncementsRepo::replace(conn, announcement_id, &replacement)?)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        announcement_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_role(UserRole::Editor)?;
        if AnnouncementsRepo::delete_by_id(conn, announcement_id)? == 0 {
            return Err(AppError::not_found("Announcement"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::AnnouncementPriority;
    use chrono::Duration;

    fn announcement(title: &str, priority: AnnouncementPriority, hours_ago: i64) -> Announcement {
        let now = Utc::now();
        Announcement {
            id: Uuid::new_v4(),
            title: title.to_string(),
            body: String::new(),
            priority,
            starts_at: now - Duration::hours(hours_ago),
            expires_at: None,
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn high_priority_first_then_newest() {
        let sorted = by_priority(vec![
            announcement("newest normal", AnnouncementPriority::Normal, 1),
            announcement("recent high", AnnouncementPriority::High, 2),
            announcement("older normal", AnnouncementPriority::Normal, 3),
            announcement("old high", AnnouncementPriority::High, 4),
        ]);
        let titles: Vec<&str> = sorted.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["recent high", "old high", "newest normal", "older normal"]);
    }
}
