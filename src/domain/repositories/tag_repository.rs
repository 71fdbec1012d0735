//! Repository trait for tag data access.

use crate::domain::entities::Tag;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the tag vocabulary.
///
/// The storage boundary owns deduplication: a unique index on the normalized
/// label makes a duplicate insert fail with [`AppError::Conflict`], which
/// [`crate::application::services::TagService::resolve`] treats as "someone
/// else created it first" and retries the lookup. Labels handed to this
/// trait are already normalized.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemTagRepository`] - in-memory
///   reference implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Inserts a tag row for a normalized label.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the label already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, label: &str) -> Result<Tag, AppError>;

    /// Finds a tag by normalized label.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_label(&self, label: &str) -> Result<Option<Tag>, AppError>;

    /// Finds a tag by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, id: i64) -> Result<Option<Tag>, AppError>;

    /// Fetches every tag whose id is in `ids`; silently skips unknown ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Tag>, AppError>;

    /// Lists all tags ordered by label.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<Tag>, AppError>;
}
