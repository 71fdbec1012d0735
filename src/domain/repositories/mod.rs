//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the external persistence collaborator following the
//! Repository pattern. The domain owns the contracts; implementations live
//! in `crate::infrastructure::persistence`.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CategoryRepository`] - Category forest rows and slug probes
//! - [`ContentRepository`] - Content item CRUD and state changes
//! - [`TagRepository`] - Tag vocabulary with normalized-label uniqueness

pub mod category_repository;
pub mod content_repository;
pub mod tag_repository;

pub use category_repository::CategoryRepository;
pub use content_repository::ContentRepository;
pub use tag_repository::TagRepository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use content_repository::MockContentRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
