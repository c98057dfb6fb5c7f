use crate::db::enums::PublicationType;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::publications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Publication {
    pub id: Uuid,
    pub title: String,
    pub authors: Vec<String>,
    pub venue: Option<String>,
    pub year: i32,
    pub publication_type: PublicationType,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub abstract_text: Option<String>,
    pub is_featured: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::publications)]
pub struct NewPublication {
    pub title: String,
    pub authors: Vec<String>,
    pub venue: Option<String>,
    pub year: i32,
    pub publication_type: PublicationType,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub abstract_text: Option<String>,
    pub is_featured: bool,
    pub created_by: Uuid,
}

/// PUT body: every field is written, absent optionals become NULL.
#[derive(Deserialize, Debug, Clone)]
pub struct PublicationRequest {
    pub title: String,
    pub authors: Vec<String>,
    pub venue: Option<String>,
    pub year: i32,
    #[serde(default = "default_type")]
    pub publication_type: PublicationType,
    pub doi: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

fn default_type() -> PublicationType {
    PublicationType::Other
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::publications)]
#[diesel(treat_none_as_null = true)]
pub struct PublicationReplace {
    pub title: String,
    pub authors: Vec<String>,
    pub venue: Option<String>,
    pub year: i32,
    pub publication_type: PublicationType,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub abstract_text: Option<String>,
    pub is_featured: bool,
    pub updated_at: DateTime<Utc>,
}

/// PATCH body: only present fields are written.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PublicationPatch {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub venue: Option<String>,
    pub year: Option<i32>,
    pub publication_type: Option<PublicationType>,
    pub doi: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub is_featured: Option<bool>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::publications)]
pub struct PublicationChanges {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub venue: Option<String>,
    pub year: Option<i32>,
    pub publication_type: Option<PublicationType>,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub abstract_text: Option<String>,
    pub is_featured: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PublicationQuery {
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub publication_type: Option<PublicationType>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
