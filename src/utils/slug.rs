//! Slug validation and generation utilities.
//!
//! Slugs identify categories and content items in URLs. Validation enforces
//! a conservative URL-safe shape; generation derives a slug from a display
//! name when the caller does not supply one.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Compiled pattern for the allowed slug alphabet.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Slugs reserved for system routes.
///
/// A slug colliding with one of these would shadow a well-known endpoint in
/// the consuming presentation layer.
const RESERVED_SLUGS: &[&str] = &[
    "admin",
    "api",
    "articles",
    "assets",
    "categories",
    "certificates",
    "projects",
    "tags",
];

/// Validates a slug against shape rules.
///
/// # Rules
///
/// - Length: 1 to `max_length` characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved system slug
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_slug(slug: &str, max_length: usize) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > max_length {
        return Err(AppError::validation(
            format!("Slug must be 1-{max_length} characters"),
            json!({ "slug": slug, "length": slug.len() }),
        ));
    }

    if !SLUG_REGEX.is_match(slug) {
        return Err(AppError::validation(
            "Slug can only contain lowercase letters, digits, and hyphens",
            json!({ "slug": slug }),
        ));
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(AppError::validation(
            "Slug cannot start or end with a hyphen",
            json!({ "slug": slug }),
        ));
    }

    if RESERVED_SLUGS.contains(&slug) {
        return Err(AppError::validation(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}

/// Derives a slug from a display name.
///
/// Lowercases the input, maps every run of non-alphanumeric characters to a
/// single hyphen, and trims leading/trailing hyphens. Returns `None` when
/// nothing URL-safe survives (for example a name of only punctuation).
pub fn slugify(name: &str) -> Option<String> {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() { None } else { Some(slug) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 64;

    #[test]
    fn test_validate_accepts_simple_slug() {
        assert!(validate_slug("engineering", MAX).is_ok());
    }

    #[test]
    fn test_validate_accepts_hyphenated_slug() {
        assert!(validate_slug("rust-backend-2026", MAX).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_slug("", MAX).is_err());
    }

    #[test]
    fn test_validate_rejects_too_long() {
        let slug = "a".repeat(MAX + 1);
        assert!(validate_slug(&slug, MAX).is_err());
    }

    #[test]
    fn test_validate_rejects_uppercase() {
        let result = validate_slug("Engineering", MAX);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("lowercase"));
    }

    #[test]
    fn test_validate_rejects_spaces() {
        assert!(validate_slug("my slug", MAX).is_err());
    }

    #[test]
    fn test_validate_rejects_leading_hyphen() {
        assert!(validate_slug("-backend", MAX).is_err());
    }

    #[test]
    fn test_validate_rejects_trailing_hyphen() {
        assert!(validate_slug("backend-", MAX).is_err());
    }

    #[test]
    fn test_validate_rejects_reserved() {
        for &reserved in RESERVED_SLUGS {
            assert!(
                validate_slug(reserved, MAX).is_err(),
                "reserved slug '{}' should be rejected",
                reserved
            );
        }
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Engineering"), Some("engineering".to_string()));
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(
            slugify("Distributed  Systems & Notes"),
            Some("distributed-systems-notes".to_string())
        );
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  (Backend)  "), Some("backend".to_string()));
    }

    #[test]
    fn test_slugify_only_punctuation_is_none() {
        assert_eq!(slugify("!!!"), None);
    }

    #[test]
    fn test_slugify_result_validates() {
        let slug = slugify("My First Article, Revised").unwrap();
        assert!(validate_slug(&slug, MAX).is_ok());
    }
}
