//! Repository trait for content item data access.

use crate::domain::entities::{ContentItem, ContentKind, ContentPatch, ContentRecord};
use crate::domain::entities::PublicationState;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for articles, projects, and certificates.
///
/// Slug uniqueness is scoped per [`ContentKind`]; implementations enforce it
/// with a unique index on `(kind, slug)`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemContentRepository`] - in-memory
///   reference implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Inserts a new item in `Draft` state, stamping timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is taken within the kind.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, record: ContentRecord) -> Result<ContentItem, AppError>;

    /// Finds an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, id: i64) -> Result<Option<ContentItem>, AppError>;

    /// Finds an item by kind and slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_slug(
        &self,
        kind: ContentKind,
        slug: &str,
    ) -> Result<Option<ContentItem>, AppError>;

    /// Lists items of a kind, newest first, with pagination.
    ///
    /// `page` is 1-indexed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(
        &self,
        kind: ContentKind,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<ContentItem>, AppError>;

    /// Counts items of a kind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self, kind: ContentKind) -> Result<i64, AppError>;

    /// Partially updates an item and bumps `updated_at`.
    ///
    /// Only fields present in [`ContentPatch`] are modified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    /// Returns [`AppError::Conflict`] if a changed slug is taken within the
    /// kind. Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, id: i64, patch: ContentPatch) -> Result<ContentItem, AppError>;

    /// Sets the publication state and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn set_state(
        &self,
        id: i64,
        state: PublicationState,
    ) -> Result<ContentItem, AppError>;

    /// Removes an item.
    ///
    /// Returns `Ok(true)` if the row existed, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn remove(&self, id: i64) -> Result<bool, AppError>;

    /// Re-points every item in category `from` to category `to` (or detaches
    /// them when `to` is `None`). Returns the number of items touched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn reassign_category(&self, from: i64, to: Option<i64>) -> Result<u64, AppError>;
}
