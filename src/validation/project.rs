use chrono::NaiveDate;

use super::{optional_url, require_text};
use crate::error::AppError;
use crate::utils::slugify;

pub fn validate_project(
    title: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    url: Option<&str>,
) -> Result<(), AppError> {
    require_text(title, "Project title", 500)?;
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(AppError::validation("End date cannot be before start date"));
        }
    }
    optional_url(url, "Project URL")
}

pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() {
        return Err(AppError::validation("Slug cannot be empty"));
    }
    if slug.len() > 255 {
        return Err(AppError::validation("Slug must be 255 characters or less"));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        || slug.starts_with('-')
        || slug.ends_with('-')
    {
        return Err(AppError::validation(
            "Slug can only contain lowercase letters, digits and inner hyphens",
        ));
    }
    Ok(())
}

/// An explicit slug is checked as given; otherwise one is derived from the title.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, AppError> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => {
            validate_slug(slug)?;
            Ok(slug.to_string())
        }
        None => {
            let derived = slugify(title);
            if derived.is_empty() {
                return Err(AppError::validation(
                    "Cannot derive a slug from the title; provide one explicitly",
                ));
            }
            Ok(derived)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_rules() {
        assert!(validate_slug("quantum-sensing-2024").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Upper").is_err());
        assert!(validate_slug("-edge").is_err());
        assert!(validate_slug("with space").is_err());
    }

    #[test]
    fn slug_is_derived_when_absent() {
        assert_eq!(resolve_slug(None, "Deep Sea Robotics").unwrap(), "deep-sea-robotics");
        assert_eq!(resolve_slug(Some("  "), "Deep Sea").unwrap(), "deep-sea");
        assert_eq!(resolve_slug(Some("custom-1"), "Ignored").unwrap(), "custom-1");
        assert!(resolve_slug(Some("Not Valid"), "x").is_err());
        assert!(resolve_slug(None, "???").is_err());
    }

    #[test]
    fn date_order() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1);
        let end = NaiveDate::from_ymd_opt(2023, 1, 1);
        assert!(validate_project("Project", start, end, None).is_err());
        assert!(validate_project("Project", end, start, None).is_ok());
        assert!(validate_project("Project", start, None, None).is_ok());
    }
}
