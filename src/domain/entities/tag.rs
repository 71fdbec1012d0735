//! Tag entity and label normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deduplicated content label.
///
/// The stored `label` is always normalized; two raw labels that normalize to
/// the same string resolve to the same tag row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new Tag instance.
    pub fn new(id: i64, label: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            label,
            created_at,
        }
    }
}

/// Normalizes a raw tag label: trims surrounding whitespace and case-folds.
///
/// The normalized form is the tag's uniqueness key.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_label("  Rust  "), "rust");
        assert_eq!(normalize_label("PostgreSQL"), "postgresql");
    }

    #[test]
    fn test_normalize_preserves_inner_whitespace() {
        assert_eq!(normalize_label("Systems Programming"), "systems programming");
    }

    #[test]
    fn test_normalize_case_folds_non_ascii() {
        assert_eq!(normalize_label("WEBentwicklung"), "webentwicklung");
        assert_eq!(normalize_label("СИСТЕМЫ"), "системы");
    }

    #[test]
    fn test_equal_after_normalization() {
        assert_eq!(normalize_label(" rust "), normalize_label("RUST"));
    }
}
