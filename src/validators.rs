//! Validation functions for configured type tags.

use std::collections::HashSet;

/// Validate a single type tag (pure function).
/// Returns an error message if validation fails, None if valid.
pub fn validate_type_tag(tag: &str) -> Option<String> {
    if tag.is_empty() {
        return Some("Type cannot be empty".to_string());
    }

    if tag.chars().any(char::is_whitespace) {
        return Some("Type cannot contain whitespace".to_string());
    }

    // `/` separates the type from the description in branch names
    if tag.contains('/') {
        return Some("Type cannot contain '/'".to_string());
    }

    None
}

/// Find the first tag that appears more than once, preserving order.
pub fn find_duplicate_tag<'a, I>(tags: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    tags.into_iter().find(|tag| !seen.insert(*tag))
}

/// Validate a free-text required field.
/// Returns an error message if the value is empty, None otherwise.
pub fn validate_required(label: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        Some(format!("{} is required", label))
    } else {
        None
    }
}

/// Validate that a value holds at least one non-whitespace character.
pub fn validate_has_words(label: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{} must contain at least one word", label))
    } else {
        None
    }
}
