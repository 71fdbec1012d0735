//! # Portfolio CMS Core
//!
//! Domain engine for a technical content-management backend: hierarchical
//! categories, content items (articles, projects, certificates) with a
//! publication lifecycle, and a deduplicated tag vocabulary.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities, repository
//!   traits, and role/capability checks
//! - **Application Layer** ([`application`]) - Invariant-owning services and
//!   the command dispatcher
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory reference
//!   implementations of the repository traits
//!
//! Transport, durable storage, asset blobs, and token validation are
//! external collaborators: the presentation layer consuming this crate maps
//! [`AppError`] values to its own responses and supplies each caller's
//! pre-authenticated [`domain::access::Role`].
//!
//! ## Invariants
//!
//! - The category hierarchy is a forest: no node is ever its own ancestor,
//!   and structural mutations are serialized so cycle checks hold
//! - Category slugs are unique across the whole forest; item slugs are
//!   unique per kind
//! - Publication follows `Draft -> Published -> Archived` with unpublish as
//!   the only backward edge; Archived is terminal
//! - At most one tag row exists per normalized label, under any concurrency
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use portfolio_cms::application::dispatch::{CreateCategory, Dispatcher};
//! use portfolio_cms::application::services::{CategoryService, ContentService, TagService};
//! use portfolio_cms::config::Config;
//! use portfolio_cms::domain::access::Role;
//! use portfolio_cms::domain::entities::NewCategory;
//! use portfolio_cms::infrastructure::persistence::{
//!     MemCategoryRepository, MemContentRepository, MemTagRepository,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = Config::default();
//! let categories = Arc::new(MemCategoryRepository::new());
//! let items = Arc::new(MemContentRepository::new());
//! let tags = Arc::new(MemTagRepository::new());
//!
//! let dispatcher = Dispatcher::new(
//!     Arc::new(CategoryService::new(categories.clone(), items.clone(), config.clone())),
//!     Arc::new(ContentService::new(items.clone(), categories.clone(), tags.clone(), config.clone())),
//!     Arc::new(TagService::new(tags, config)),
//! );
//!
//! let created = dispatcher
//!     .dispatch(
//!         Role::Admin,
//!         CreateCategory(NewCategory {
//!             name: "Engineering".to_string(),
//!             slug: None,
//!             parent_id: None,
//!         }),
//!     )
//!     .await
//!     .unwrap();
//! assert_eq!(created.slug, "engineering");
//! # }
//! ```
//!
//! ## Configuration
//!
//! Policy knobs (depth ceiling, default delete policy, length bounds) load
//! from environment variables via [`config::Config`]. See [`config`] for
//! available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::dispatch::Dispatcher;
    pub use crate::application::services::{CategoryService, ContentService, TagService};
    pub use crate::config::Config;
    pub use crate::domain::access::{Capability, Role};
    pub use crate::domain::entities::{
        Category, ContentItem, ContentKind, ContentPatch, DeletePolicy, NewCategory,
        NewContentItem, PublicationState, Tag,
    };
    pub use crate::error::AppError;
}
