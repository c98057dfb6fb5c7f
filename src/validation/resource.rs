use super::require_text;
use crate::error::AppError;

pub fn validate_resource(name: &str, location: Option<&str>) -> Result<(), AppError> {
    require_text(name, "Resource name", 255)?;
    if let Some(loc) = location {
        if loc.chars().count() > 255 {
            return Err(AppError::validation("Location must be 255 characters or less"));
        }
    }
    Ok(())
}
