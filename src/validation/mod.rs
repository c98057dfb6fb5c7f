pub mod announcement;
pub mod auth;
pub mod booking;
pub mod extract;
pub mod portfolio;
pub mod post;
pub mod profile;
pub mod project;
pub mod publication;
pub mod resource;

use axum::{
    Json, async_trait,
    extract::FromRequest,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::db::models::api::{ApiResponse, ErrorDetail};
use crate::error::AppError;

pub use extract::{ApiJson, ApiPath, ApiQuery};

/// JSON extractor that runs `validator` rules before the handler sees the body.
/// Rule failures come back as a 400 listing every offending field.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(
        req: Request<axum::body::Body>,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        value.validate().map_err(|errors| {
            let response = ApiResponse::<()>::validation_error(field_errors(&errors));
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        })?;

        Ok(ValidatedJson(value))
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut details: Vec<ErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| ErrorDetail {
                field: Some(field.to_string()),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// Trims and drops empty optional text.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn require_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{} must be {} characters or less",
            field, max_len
        )));
    }
    Ok(())
}

pub(crate) fn optional_url(value: Option<&str>, field: &str) -> Result<(), AppError> {
    if let Some(raw) = value.filter(|v| !v.trim().is_empty()) {
        rules::validate_http_url(raw.trim())
            .map_err(|_| AppError::validation(format!("{} must be a valid http(s) URL", field)))?;
    }
    Ok(())
}

/// Common validation rules
pub mod rules {
    use validator::ValidationError;

    /// Password strength: at least 8 characters and three of lower, upper, digit, symbol.
    pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
        if password.len() < 8 {
            return Err(ValidationError::new("password_too_short"));
        }

        let mut score = 0;
        if password.chars().any(|c| c.is_lowercase()) {
            score += 1;
        }
        if password.chars().any(|c| c.is_uppercase()) {
            score += 1;
        }
        if password.chars().any(|c| c.is_numeric()) {
            score += 1;
        }
        if password.chars().any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)) {
            score += 1;
        }

        if score < 3 {
            return Err(ValidationError::new("weak_password"));
        }

        Ok(())
    }

    pub fn validate_http_url(raw: &str) -> Result<(), ValidationError> {
        match url::Url::parse(raw) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            _ => Err(ValidationError::new("invalid_url")),
        }
    }

    /// ORCID iD `0000-0002-1825-0097`: four groups of digits, last char may
    /// be `X`, with the ISO 7064 11,2 check digit.
    pub fn validate_orcid(orcid: &str) -> Result<(), ValidationError> {
        if !orcid.is_ascii() {
            return Err(ValidationError::new("invalid_orcid_format"));
        }
        let groups: Vec<&str> = orcid.split('-').collect();
        if groups.len() != 4 || groups.iter().any(|g| g.len() != 4) {
            return Err(ValidationError::new("invalid_orcid_format"));
        }

        let chars: Vec<char> = groups.concat().chars().collect();
        let (body, check) = chars.split_at(15);
        if !body.iter().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("invalid_orcid_format"));
        }

        let mut total: u32 = 0;
        for c in body {
            total = (total + c.to_digit(10).unwrap_or(0)) * 2;
        }
        let remainder = total % 11;
        let expected = match (12 - remainder) % 11 {
            10 => 'X',
            digit => char::from_digit(digit, 10).unwrap_or('?'),
        };

        if check[0].to_ascii_uppercase() != expected {
            return Err(ValidationError::new("invalid_orcid_checksum"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;

    #[test]
    fn password_strength() {
        assert!(validate_password_strength("StrongP4ss!").is_ok());
        assert!(validate_password_strength("lowercase1A").is_ok());
        assert!(validate_password_strength("short1A").is_err());
        assert!(validate_password_strength("alllowercase").is_err());
    }

    #[test]
    fn orcid_checksum() {
        assert!(validate_orcid("0000-0002-1825-0097").is_ok());
        assert!(validate_orcid("0000-0002-9079-593X").is_ok());
        assert!(validate_orcid("0000-0002-1825-0098").is_err());
        assert!(validate_orcid("0000-0002-1825").is_err());
        assert!(validate_orcid("abcd-0002-1825-0097").is_err());
    }

    #[test]
    fn url_rules() {
        assert!(validate_http_url("https://lab.example.org/papers/1").is_ok());
        assert!(validate_http_url("ftp://example.org").is_err());
        assert!(validate_http_url("not a url").is_err());
        assert!(optional_url(None, "url").is_ok());
        assert!(optional_url(Some(""), "url").is_ok());
        assert!(optional_url(Some("nope"), "url").is_err());
    }

    #[test]
    fn rule_failures_become_field_details() {
        #[derive(validator::Validate)]
        struct Signup {
            #[validate(email(message = "Invalid email format"))]
            email: String,
            #[validate(length(min = 1))]
            name: String,
        }

        let errors = Signup {
            email: "nope".into(),
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        let details = field_errors(&errors);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].field.as_deref(), Some("email"));
        assert_eq!(details[0].message, "Invalid email format");
        assert_eq!(details[1].field.as_deref(), Some("name"));
        assert_eq!(details[1].code, "length");
    }

    #[test]
    fn normalizes_optional_text() {
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(normalize_optional(Some(" x ".into())), Some("x".into()));
        assert_eq!(normalize_optional(None), None);
    }
}
