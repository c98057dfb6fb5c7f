use crate::db::enums::ResourceCategory;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::resources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: ResourceCategory,
    pub location: Option<String>,
    pub requires_approval: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::resources)]
pub struct NewResource {
    pub name: String,
    pub description: Option<String>,
    pub category: ResourceCategory,
    pub location: Option<String>,
    pub requires_approval: bool,
    pub is_active: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResourceRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: ResourceCategory,
    pub location: Option<String>,
    #[serde(default = "default_true")]
    pub requires_approval: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_category() -> ResourceCategory {
    ResourceCategory::Other
}

fn default_true() -> bool {
    true
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::resources)]
#[diesel(treat_none_as_null = true)]
pub struct ResourceReplace {
    pub name: String,
    pub description: Option<String>,
    pub category: ResourceCategory,
    pub location: Option<String>,
    pub requires_approval: bool,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ResourceListQuery {
    pub category: Option<ResourceCategory>,
}

#[derive(Deserialize, Debug)]
pub struct AvailabilityQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}
