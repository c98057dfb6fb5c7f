/// Lower-case ASCII slug: runs of anything that is not a letter or digit
/// collapse into a single `-`, and leading/trailing hyphens are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.len() > 200 {
        slug.truncate(200);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

/// Removes anything between `<` and `>`.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Plain-text preview of `content`, at most `max_chars` characters, cut at a
/// word boundary when one exists. An ellipsis is appended when cut.
pub fn excerpt_from(content: &str, max_chars: usize) -> String {
    let plain = strip_tags(content);
    let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let budget = max_chars.saturating_sub(1);
    let cut: String = collapsed.chars().take(budget).collect();
    let trimmed = match cut.rfind(' ') {
        Some(idx) if idx > 0 => cut[..idx].trim_end().to_string(),
        _ => cut,
    };
    format!("{}…", trimmed)
}
