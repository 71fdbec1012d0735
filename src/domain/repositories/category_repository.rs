//! Repository trait for category data access.

use crate::domain::entities::{Category, CategoryRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the category forest.
///
/// The contract mirrors what the external persistence collaborator exposes:
/// row CRUD, a slug-existence probe, and parent/child lookups. Consistency
/// rules (cycle prevention, depth limits, deletion policies) live in
/// [`crate::application::services::CategoryService`], which serializes
/// structural mutations; implementations only need per-call atomicity and a
/// unique index on `slug`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemCategoryRepository`] - in-memory
///   reference implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Inserts a new category row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is already taken anywhere
    /// in the forest. Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, record: CategoryRecord) -> Result<Category, AppError>;

    /// Finds a category by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, id: i64) -> Result<Option<Category>, AppError>;

    /// Returns true if any category uses the slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError>;

    /// Lists the direct children of a node, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn children_of(&self, id: i64) -> Result<Vec<Category>, AppError>;

    /// Re-points a node's parent reference.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the node does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn set_parent(&self, id: i64, parent_id: Option<i64>) -> Result<Category, AppError>;

    /// Removes a category row.
    ///
    /// Returns `Ok(true)` if the row existed, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn remove(&self, id: i64) -> Result<bool, AppError>;
}
