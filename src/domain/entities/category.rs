//! Category entity forming the hierarchical content taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

/// A node in the category forest.
///
/// `parent_id` is a plain identifier reference rather than an embedded node;
/// ancestry is resolved by walking identifiers, which keeps the structure
/// acyclic by construction checks rather than ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new Category instance.
    pub fn new(
        id: i64,
        name: String,
        slug: String,
        parent_id: Option<i64>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            slug,
            parent_id,
            created_at,
            updated_at,
        }
    }

    /// Returns true if the category has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Caller payload for creating a category.
///
/// When `slug` is absent one is derived from `name`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub slug: Option<String>,
    pub parent_id: Option<i64>,
}

/// Fully resolved category row handed to persistence.
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
}

/// Policy applied to a deleted category's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Refuse deletion while the node has children.
    BlockIfHasChildren,
    /// Re-parent children (and the node's items) to the deleted node's parent.
    ReassignChildrenToParent,
    /// Delete the entire subtree; items are detached, never deleted.
    CascadeDelete,
}

impl FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" | "block_if_has_children" => Ok(Self::BlockIfHasChildren),
            "reassign" | "reassign_children_to_parent" => Ok(Self::ReassignChildrenToParent),
            "cascade" | "cascade_delete" => Ok(Self::CascadeDelete),
            other => Err(format!("unknown delete policy '{other}'")),
        }
    }
}
