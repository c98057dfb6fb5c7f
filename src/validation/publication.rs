use chrono::{Datelike, Utc};

use super::{optional_url, require_text};
use crate::error::AppError;

pub const MIN_YEAR: i32 = 1900;

pub fn validate_publication(
    title: &str,
    authors: &[String],
    year: i32,
    doi: Option<&str>,
    url: Option<&str>,
) -> Result<(), AppError> {
    require_text(title, "Title", 500)?;

    if authors.iter().all(|a| a.trim().is_empty()) {
        return Err(AppError::validation("At least one author is required"));
    }

    let latest = Utc::now().year() + 1;
    if year < MIN_YEAR || year > latest {
        return Err(AppError::validation(format!(
            "Year must be between {} and {}",
            MIN_YEAR, latest
        )));
    }

    if let Some(doi) = doi.map(str::trim).filter(|d| !d.is_empty()) {
        validate_doi(doi)?;
    }

    optional_url(url, "URL")
}

/// DOIs look like `10.<registrant>/<suffix>`.
pub fn validate_doi(doi: &str) -> Result<(), AppError> {
    let valid = doi
        .strip_prefix("10.")
        .and_then(|rest| rest.split_once('/'))
        .map(|(registrant, suffix)| {
            !registrant.is_empty()
                && registrant.chars().all(|c| c.is_ascii_digit() || c == '.')
                && !suffix.trim().is_empty()
        })
        .unwrap_or(false);

    if !valid {
        return Err(AppError::validation("DOI must look like 10.<registrant>/<suffix>"));
    }
    Ok(())
}

/// Trimmed, non-blank author names in their original order.
pub fn clean_authors(authors: Vec<String>) -> Vec<String> {
    authors
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doi_shape() {
        assert!(validate_doi("10.1000/xyz123").is_ok());
        assert!(validate_doi("10.1038.2/nphys1170").is_ok());
        assert!(validate_doi("11.1000/xyz").is_err());
        assert!(validate_doi("10.1000").is_err());
        assert!(validate_doi("10./abc").is_err());
    }

    #[test]
    fn requires_author_and_sane_year() {
        let authors = vec!["A. Turing".to_string()];
        assert!(validate_publication("Computable numbers", &authors, 1936, None, None).is_ok());
        assert!(
            validate_publication("Computable numbers", &[" ".to_string()], 1936, None, None)
                .is_err()
        );
        assert!(validate_publication("Computable numbers", &authors, 1800, None, None).is_err());
        assert!(validate_publication("", &authors, 1936, None, None).is_err());
        assert!(validate_publication("T", &authors, 2001, Some("bad"), None).is_err());
    }

    #[test]
    fn authors_are_trimmed() {
        let cleaned = clean_authors(vec![" Ada ".into(), "".into(), "Grace".into()]);
        assert_eq!(cleaned, vec!["Ada".to_string(), "Grace".to_string()]);
    }
}
