pub mod announcements;
pub mod bookings;
pub mod portfolio;
pub mod posts;
pub mod profiles;
pub mod projects;
pub mod publications;
pub mod resources;
pub mod stats;
pub mod users;

/// `%term%` pattern for case-insensitive substring search.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" graph "), "%graph%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
