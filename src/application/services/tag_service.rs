//! Tag resolution service.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::entities::{normalize_label, Tag};
use crate::domain::repositories::TagRepository;
use crate::error::AppError;
use serde_json::json;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;

/// Retries after a duplicate-label conflict before giving up.
const RESOLVE_RETRIES: usize = 5;

/// Service deduplicating the tag vocabulary.
///
/// `resolve` is the only write path for tags: it normalizes the label and
/// performs a lookup-or-insert. Concurrent resolution of the same label is
/// safe because the storage boundary enforces one row per normalized label;
/// when an insert loses that race it fails with a conflict and the lookup is
/// retried, returning the row the winner created.
pub struct TagService<T: TagRepository> {
    tags: Arc<T>,
    config: Config,
}

impl<T: TagRepository> TagService<T> {
    /// Creates a new tag service.
    pub fn new(tags: Arc<T>, config: Config) -> Self {
        Self { tags, config }
    }

    /// Resolves a raw label to its tag, creating the tag on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the normalized label is empty
    /// or longer than the configured maximum, and [`AppError::Internal`] if
    /// resolution keeps losing the insert race after several retries.
    pub async fn resolve(&self, label: &str) -> Result<Tag, AppError> {
        let normalized = normalize_label(label);

        if normalized.is_empty() {
            return Err(AppError::validation(
                "Tag label must not be empty",
                json!({ "label": label }),
            ));
        }
        if normalized.chars().count() > self.config.max_tag_length {
            return Err(AppError::validation(
                format!("Tag label must be at most {} characters", self.config.max_tag_length),
                json!({ "label": normalized }),
            ));
        }

        let strategy = FixedInterval::from_millis(10).take(RESOLVE_RETRIES);
        let resolved = RetryIf::spawn(
            strategy,
            || self.lookup_or_insert(&normalized),
            |err: &AppError| matches!(err, AppError::Conflict { .. }),
        )
        .await;

        match resolved {
            Ok(tag) => Ok(tag),
            // Conflict after every retry means find/insert kept flapping.
            Err(AppError::Conflict { .. }) => Err(AppError::internal(
                "Tag resolution did not converge",
                json!({ "label": normalized }),
            )),
            Err(err) => Err(err),
        }
    }

    /// Retrieves a tag by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the tag does not exist.
    pub async fn get(&self, id: i64) -> Result<Tag, AppError> {
        self.tags
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "id": id })))
    }

    /// Lists all tags ordered by label.
    pub async fn list(&self) -> Result<Vec<Tag>, AppError> {
        self.tags.list().await
    }

    async fn lookup_or_insert(&self, normalized: &str) -> Result<Tag, AppError> {
        if let Some(existing) = self.tags.find_by_label(normalized).await? {
            return Ok(existing);
        }

        match self.tags.insert(normalized).await {
            Ok(tag) => {
                tracing::debug!(label = %normalized, id = tag.id, "tag created");
                Ok(tag)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTagRepository;
    use chrono::Utc;

    fn tag(id: i64, label: &str) -> Tag {
        Tag::new(id, label.to_string(), Utc::now())
    }

    fn service(tags: MockTagRepository) -> TagService<MockTagRepository> {
        TagService::new(Arc::new(tags), Config::default())
    }

    #[tokio::test]
    async fn test_resolve_returns_existing_tag() {
        let mut tags = MockTagRepository::new();

        let existing = tag(1, "rust");
        tags.expect_find_by_label()
            .withf(|label| label == "rust")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        tags.expect_insert().times(0);

        let resolved = service(tags).resolve("  Rust ").await.unwrap();

        assert_eq!(resolved.id, 1);
        assert_eq!(resolved.label, "rust");
    }

    #[tokio::test]
    async fn test_resolve_creates_on_first_use() {
        let mut tags = MockTagRepository::new();

        tags.expect_find_by_label().times(1).returning(|_| Ok(None));
        let created = tag(5, "postgres");
        tags.expect_insert()
            .withf(|label| label == "postgres")
            .times(1)
            .returning(move |_| Ok(created.clone()));

        let resolved = service(tags).resolve("Postgres").await.unwrap();

        assert_eq!(resolved.id, 5);
    }

    #[tokio::test]
    async fn test_resolve_retries_after_losing_insert_race() {
        let mut tags = MockTagRepository::new();

        // First lookup misses, insert loses the race, second lookup wins.
        let mut lookups = 0;
        tags.expect_find_by_label().times(2).returning(move |_| {
            lookups += 1;
            if lookups == 1 {
                Ok(None)
            } else {
                Ok(Some(tag(9, "rust")))
            }
        });
        tags.expect_insert().times(1).returning(|label| {
            Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "label": label }),
            ))
        });

        let resolved = service(tags).resolve("rust").await.unwrap();

        assert_eq!(resolved.id, 9);
    }

    #[tokio::test]
    async fn test_resolve_rejects_empty_label() {
        let tags = MockTagRepository::new();

        let result = service(tags).resolve("   ").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_resolve_rejects_oversized_label() {
        let tags = MockTagRepository::new();

        let label = "x".repeat(65);
        let result = service(tags).resolve(&label).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_get_missing_tag_is_not_found() {
        let mut tags = MockTagRepository::new();
        tags.expect_find().returning(|_| Ok(None));

        let result = service(tags).get(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
