use chrono::NaiveDate;

use super::require_text;
use crate::db::models::portfolio::{
    AwardInput, EducationInput, ExperienceInput, LanguageInput, SkillInput,
};
use crate::error::AppError;

fn ordered_dates(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), AppError> {
    match end {
        Some(end) if end < start => {
            Err(AppError::validation("End date cannot be before start date"))
        }
        _ => Ok(()),
    }
}

pub fn validate_education(input: &EducationInput) -> Result<(), AppError> {
    require_text(&input.institution, "Institution", 255)?;
    require_text(&input.degree, "Degree", 255)?;
    ordered_dates(input.start_date, input.end_date)
}

pub fn validate_award(input: &AwardInput) -> Result<(), AppError> {
    require_text(&input.title, "Award title", 255)
}

pub fn validate_experience(input: &ExperienceInput) -> Result<(), AppError> {
    require_text(&input.organization, "Organization", 255)?;
    require_text(&input.position, "Position", 255)?;
    ordered_dates(input.start_date, input.end_date)
}

pub fn validate_skill(input: &SkillInput) -> Result<(), AppError> {
    require_text(&input.name, "Skill name", 100)
}

pub fn validate_language(input: &LanguageInput) -> Result<(), AppError> {
    require_text(&input.name, "Language name", 100)
}
