use super::optional_url;
use super::rules::validate_orcid;
use crate::db::models::profile::UpdateProfileRequest;
use crate::error::AppError;

pub const MAX_INTERESTS: usize = 15;

pub fn validate_update_profile(req: &UpdateProfileRequest) -> Result<(), AppError> {
    if let Some(title) = req.title.as_deref() {
        if title.chars().count() > 255 {
            return Err(AppError::validation("Title must be 255 characters or less"));
        }
    }
    optional_url(req.avatar_url.as_deref(), "Avatar URL")?;
    optional_url(req.website_url.as_deref(), "Website URL")?;

    if let Some(orcid) = req.orcid_id.as_deref().map(str::trim).filter(|o| !o.is_empty()) {
        validate_orcid(orcid).map_err(|_| AppError::validation("Invalid ORCID iD"))?;
    }

    if req.research_interests.len() > MAX_INTERESTS {
        return Err(AppError::validation(format!(
            "At most {} research interests are allowed",
            MAX_INTERESTS
        )));
    }
    Ok(())
}
