use chrono::{DateTime, Utc};

use super::require_text;
use crate::error::AppError;

pub fn validate_announcement(
    title: &str,
    body: &str,
    starts_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<(), AppError> {
    require_text(title, "Title", 255)?;
    if body.trim().is_empty() {
        return Err(AppError::validation("Body is required"));
    }
    if let Some(end) = expires_at {
        if end <= starts_at {
            return Err(AppError::validation("Expiry must be after the start time"));
        }
    }
    Ok(())
}
