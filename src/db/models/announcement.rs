use crate::db::enums::AnnouncementPriority;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::announcements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub priority: AnnouncementPriority,
    pub starts_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::announcements)]
pub struct NewAnnouncement {
    pub title: String,
    pub body: String,
    pub priority: AnnouncementPriority,
    pub starts_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AnnouncementRequest {
    pub title: String,
    pub body: String,
    #[serde(default = "default_priority")]
    pub priority: AnnouncementPriority,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_priority() -> AnnouncementPriority {
    AnnouncementPriority::Normal
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::announcements)]
#[diesel(treat_none_as_null = true)]
pub struct AnnouncementReplace {
    pub title: String,
    pub body: String,
    pub priority: AnnouncementPriority,
    pub starts_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AnnouncementQuery {
    pub all: Option<bool>,
}
