use super::portfolio::Portfolio;
use crate::db::enums::UserRole;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub website_url: Option<String>,
    pub orcid_id: Option<String>,
    pub research_interests: Vec<String>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfile {
    pub user_id: Uuid,
}

/// Full replacement of the editable profile fields.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(treat_none_as_null = true)]
pub struct ProfileChanges {
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub website_url: Option<String>,
    pub orcid_id: Option<String>,
    pub research_interests: Vec<String>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UpdateProfileRequest {
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub website_url: Option<String>,
    pub orcid_id: Option<String>,
    #[serde(default)]
    pub research_interests: Vec<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

/// Public card for the people listing.
#[derive(Serialize, Debug)]
pub struct MemberSummary {
    pub user_id: Uuid,
    pub name: String,
    pub role: UserRole,
    pub title: Option<String>,
    pub avatar_url: Option<String>,
    pub research_interests: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct ProfileDetail {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub profile: Profile,
    pub portfolio: Portfolio,
}

#[derive(Serialize, Debug)]
pub struct CurrentUser {
    pub user: super::auth::UserInfo,
    pub profile: Option<Profile>,
}
