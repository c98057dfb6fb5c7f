use super::{optional_url, require_text};
use crate::error::AppError;

pub const MAX_TAGS: usize = 20;

pub fn validate_post(
    title: &str,
    content: &str,
    cover_image_url: Option<&str>,
) -> Result<(), AppError> {
    require_text(title, "Title", 500)?;
    if content.trim().is_empty() {
        return Err(AppError::validation("Content is required"));
    }
    optional_url(cover_image_url, "Cover image URL")
}

/// Lower-cases, trims and de-duplicates tags, keeping first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, AppError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !cleaned.contains(&tag) {
            cleaned.push(tag);
        }
    }
    if cleaned.len() > MAX_TAGS {
        return Err(AppError::validation(format!(
            "A post can have at most {} tags",
            MAX_TAGS
        )));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_normalized() {
        let tags =
            normalize_tags(vec![" Rust ".into(), "rust".into(), "".into(), "Lab".into()]).unwrap();
        assert_eq!(tags, vec!["rust".to_string(), "lab".to_string()]);
    }

    #[test]
    fn too_many_tags() {
        let tags = (0..=MAX_TAGS).map(|i| format!("t{}", i)).collect();
        assert!(normalize_tags(tags).is_err());
    }

    #[test]
    fn post_requires_content() {
        assert!(validate_post("Title", "Body", None).is_ok());
        assert!(validate_post("Title", "   ", None).is_err());
        assert!(validate_post("Title", "Body", Some("not-a-url")).is_err());
    }
}
