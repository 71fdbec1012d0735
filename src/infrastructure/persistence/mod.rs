//! In-memory reference implementations of the repository traits.
//!
//! Durable persistence is an external collaborator; these implementations
//! stand in for it with the same observable contract a relational backend
//! would give the domain: assigned ids, stamped timestamps, and unique
//! indexes answering duplicate inserts with conflicts. They back the
//! integration tests and any embedded use of the crate.

pub mod mem_category_repository;
pub mod mem_content_repository;
pub mod mem_tag_repository;

pub use mem_category_repository::MemCategoryRepository;
pub use mem_content_repository::MemContentRepository;
pub use mem_tag_repository::MemTagRepository;
