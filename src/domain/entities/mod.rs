//! Core domain entities representing the content model.
//!
//! Entities are plain data structures without orchestration logic; the
//! services in [`crate::application`] enforce the rules that span entities.
//!
//! # Entity Types
//!
//! - [`Category`] - A node in the hierarchical content taxonomy
//! - [`ContentItem`] - An article, project, or certificate with a
//!   publication lifecycle
//! - [`Tag`] - A deduplicated normalized label
//!
//! # Design Pattern
//!
//! Creation payloads are separate structs (`NewCategory`, `NewContentItem`)
//! validated at the boundary; fully resolved rows (`CategoryRecord`,
//! `ContentRecord`) are what persistence receives; `ContentPatch` models
//! partial updates with double-`Option` clear semantics.

pub mod category;
pub mod content_item;
pub mod tag;

pub use category::{Category, CategoryRecord, DeletePolicy, NewCategory};
pub use content_item::{
    ContentItem, ContentKind, ContentPatch, ContentRecord, NewContentItem, PublicationState,
};
pub use tag::{normalize_label, Tag};
