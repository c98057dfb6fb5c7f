use crate::db::enums::{LanguageProficiency, SkillLevel};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::educations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Education {
    pub id: Uuid,
    pub user_id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::educations)]
#[diesel(treat_none_as_null = true)]
pub struct EducationInput {
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::awards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Award {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub issuer: Option<String>,
    pub awarded_on: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::awards)]
#[diesel(treat_none_as_null = true)]
pub struct AwardInput {
    pub title: String,
    pub issuer: Option<String>,
    pub awarded_on: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::experiences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Experience {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organization: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::experiences)]
#[diesel(treat_none_as_null = true)]
pub struct ExperienceInput {
    pub organization: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Skill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub level: SkillLevel,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::skills)]
pub struct SkillInput {
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::languages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Language {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub proficiency: LanguageProficiency,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::languages)]
pub struct LanguageInput {
    pub name: String,
    pub proficiency: LanguageProficiency,
}

/// All portfolio sections of one member.
#[derive(Serialize, Debug, Default)]
pub struct Portfolio {
    pub educations: Vec<Education>,
    pub awards: Vec<Award>,
    pub experiences: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
}
